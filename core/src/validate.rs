//! Required-parameter checks.
//!
//! Operations call [`require`] once per required parameter, in declaration
//! order, and propagate with `?`. The first absent parameter aborts the call
//! before any path rendering, payload assembly or I/O happens.

use crate::error::ApiError;

/// Unwrap a required parameter or fail with `ApiError::Validation` naming it.
///
/// Only absence counts: an empty string or an empty list is a supplied value.
pub fn require<'a, V: ?Sized>(parameter: &'static str, value: Option<&'a V>) -> Result<&'a V, ApiError> {
    value.ok_or(ApiError::Validation { parameter })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_value_is_returned() {
        let id = Some("db1".to_string());
        assert_eq!(require("databaseId", id.as_deref()).unwrap(), "db1");
    }

    #[test]
    fn absent_value_names_parameter() {
        let id: Option<String> = None;
        let err = require("collectionId", id.as_deref()).unwrap_err();
        assert!(matches!(err, ApiError::Validation { parameter: "collectionId" }));
    }

    #[test]
    fn empty_values_count_as_supplied() {
        let id = Some(String::new());
        assert_eq!(require("documentId", id.as_deref()).unwrap(), "");

        let list: Option<Vec<String>> = Some(Vec::new());
        assert!(require("read", list.as_ref()).unwrap().is_empty());
    }

    #[test]
    fn first_absent_parameter_wins() {
        fn check(database_id: Option<&str>, collection_id: Option<&str>) -> Result<(), ApiError> {
            require("databaseId", database_id)?;
            require("collectionId", collection_id)?;
            Ok(())
        }

        let err = check(None, None).unwrap_err();
        assert!(matches!(err, ApiError::Validation { parameter: "databaseId" }));

        let err = check(Some("db1"), None).unwrap_err();
        assert!(matches!(err, ApiError::Validation { parameter: "collectionId" }));

        assert!(check(Some("db1"), Some("col1")).is_ok());
    }
}
