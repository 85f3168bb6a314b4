//! Helpers for the `queries` list parameter and for document ids.
//!
//! Queries use the `attribute.operator(value,...)` syntax of response format
//! 0.15: strings are double-quoted, numbers and booleans are written bare.

use std::fmt;

/// A single value or a list of values on the right-hand side of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<QueryValue>),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::String(s) => write!(f, "\"{s}\""),
            QueryValue::Int(n) => write!(f, "{n}"),
            QueryValue::Float(n) => write!(f, "{n}"),
            QueryValue::Bool(b) => write!(f, "{b}"),
            QueryValue::List(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::String(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::String(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Int(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        QueryValue::Int(value.into())
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Int(value.into())
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        QueryValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// Builders for entries of `ListDocuments::queries`.
pub struct Query;

impl Query {
    pub fn equal(attribute: &str, value: impl Into<QueryValue>) -> String {
        Self::build(attribute, "equal", value.into())
    }

    pub fn not_equal(attribute: &str, value: impl Into<QueryValue>) -> String {
        Self::build(attribute, "notEqual", value.into())
    }

    pub fn lesser(attribute: &str, value: impl Into<QueryValue>) -> String {
        Self::build(attribute, "lesser", value.into())
    }

    pub fn lesser_equal(attribute: &str, value: impl Into<QueryValue>) -> String {
        Self::build(attribute, "lesserEqual", value.into())
    }

    pub fn greater(attribute: &str, value: impl Into<QueryValue>) -> String {
        Self::build(attribute, "greater", value.into())
    }

    pub fn greater_equal(attribute: &str, value: impl Into<QueryValue>) -> String {
        Self::build(attribute, "greaterEqual", value.into())
    }

    pub fn search(attribute: &str, value: impl Into<String>) -> String {
        Self::build(attribute, "search", QueryValue::String(value.into()))
    }

    fn build(attribute: &str, operator: &str, value: QueryValue) -> String {
        format!("{attribute}.{operator}({value})")
    }
}

/// Document id helpers.
pub struct Id;

impl Id {
    /// Ask the backend to generate the id.
    pub fn unique() -> String {
        "unique()".to_string()
    }

    pub fn custom(id: impl Into<String>) -> String {
        id.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_are_quoted() {
        assert_eq!(Query::equal("user", "ada"), r#"user.equal("ada")"#);
        assert_eq!(Query::search("message", "hello world"), r#"message.search("hello world")"#);
    }

    #[test]
    fn numbers_and_booleans_are_bare() {
        assert_eq!(Query::greater("score", 10), "score.greater(10)");
        assert_eq!(Query::lesser_equal("ratio", 0.5), "ratio.lesserEqual(0.5)");
        assert_eq!(Query::not_equal("archived", true), "archived.notEqual(true)");
    }

    #[test]
    fn lists_are_comma_joined() {
        assert_eq!(Query::equal("user", vec!["ada", "bob"]), r#"user.equal("ada","bob")"#);
        assert_eq!(Query::greater_equal("n", vec![1, 2]), "n.greaterEqual(1,2)");
    }

    #[test]
    fn unique_id_is_server_generated_marker() {
        assert_eq!(Id::unique(), "unique()");
        assert_eq!(Id::custom("doc1"), "doc1");
    }
}
