//! In-memory documents backend.
//!
//! Serves the five document endpoints with the same wire shapes as the real
//! backend: `$`-prefixed system attributes, `{total, documents}` pages, and
//! the `{message, code, type}` error envelope. Collections spring into
//! existence on first use. Query filters understand `equal` and `notEqual`.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

const DEFAULT_LIMIT: usize = 25;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Document {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$collection")]
    pub collection: String,
    #[serde(rename = "$read")]
    pub read: Vec<String>,
    #[serde(rename = "$write")]
    pub write: Vec<String>,
    #[serde(rename = "$createdAt")]
    pub created_at: i64,
    #[serde(rename = "$updatedAt")]
    pub updated_at: i64,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentList {
    pub total: usize,
    pub documents: Vec<Document>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocument {
    pub document_id: String,
    pub data: Map<String, Value>,
    pub read: Option<Vec<String>>,
    pub write: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct UpdateDocument {
    #[serde(default)]
    pub data: Map<String, Value>,
    pub read: Option<Vec<String>>,
    pub write: Option<Vec<String>>,
}

#[derive(Default)]
struct Collection {
    order: Vec<String>,
    documents: HashMap<String, Document>,
}

impl Collection {
    fn ordered(&self) -> Vec<&Document> {
        self.order.iter().filter_map(|id| self.documents.get(id)).collect()
    }
}

type CollectionKey = (String, String);

type Db = Arc<RwLock<HashMap<CollectionKey, Collection>>>;

/// Error response in the backend's envelope.
#[derive(Debug)]
pub struct ServerError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl ServerError {
    fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            kind: "document_not_found",
            message: "Document with the requested ID could not be found.".to_string(),
        }
    }

    fn conflict() -> Self {
        Self {
            status: StatusCode::CONFLICT,
            kind: "document_already_exists",
            message: "Document with the requested ID already exists.".to_string(),
        }
    }

    fn bad_request(kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind,
            message: message.into(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "message": self.message,
            "code": self.status.as_u16(),
            "type": self.kind,
        }));
        (self.status, body).into_response()
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route(
            "/v1/databases/{database_id}/collections/{collection_id}/documents",
            get(list_documents).post(create_document),
        )
        .route(
            "/v1/databases/{database_id}/collections/{collection_id}/documents/{document_id}",
            get(get_document).patch(update_document).delete(delete_document),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!("mock backend listening on {addr}");
    }
    axum::serve(listener, app()).await
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

/// Options of a list call, decoded from repeated `key` / `key[]` pairs.
#[derive(Debug, Default)]
struct ListOptions {
    queries: Vec<String>,
    limit: Option<usize>,
    offset: usize,
    cursor: Option<String>,
    before: bool,
    order_attributes: Vec<String>,
    order_types: Vec<String>,
}

impl ListOptions {
    fn parse(pairs: Vec<(String, String)>) -> Result<Self, ServerError> {
        let mut options = Self::default();
        for (key, value) in pairs {
            match key.trim_end_matches("[]") {
                "queries" => options.queries.push(value),
                "limit" => options.limit = Some(parse_number("limit", &value)?),
                "offset" => options.offset = parse_number("offset", &value)?,
                "cursor" => options.cursor = Some(value),
                "cursorDirection" => match value.as_str() {
                    "after" => options.before = false,
                    "before" => options.before = true,
                    other => {
                        return Err(ServerError::bad_request(
                            "general_argument_invalid",
                            format!("Invalid cursorDirection: {other}"),
                        ))
                    }
                },
                "orderAttributes" => options.order_attributes.push(value),
                "orderTypes" => options.order_types.push(value),
                _ => {}
            }
        }
        Ok(options)
    }

    /// Walk the order attributes in turn, each paired with its direction
    /// (ASC when missing), falling through to the next one on a tie.
    fn ordering(&self, a: &Document, b: &Document) -> std::cmp::Ordering {
        self.order_attributes
            .iter()
            .enumerate()
            .map(|(i, attribute)| {
                let ordering = compare(a.data.get(attribute), b.data.get(attribute));
                match self.order_types.get(i).map(String::as_str) {
                    Some("DESC") => ordering.reverse(),
                    _ => ordering,
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}

fn parse_number(name: &str, value: &str) -> Result<usize, ServerError> {
    value
        .parse()
        .map_err(|_| ServerError::bad_request("general_argument_invalid", format!("Invalid {name}: {value}")))
}

/// A parsed `attribute.operator(values)` filter.
struct Filter {
    attribute: String,
    negate: bool,
    values: Vec<Value>,
}

impl Filter {
    fn parse(query: &str) -> Result<Self, ServerError> {
        let invalid = || ServerError::bad_request("general_query_invalid", format!("Invalid query: {query}"));
        let (attribute, rest) = query.split_once('.').ok_or_else(invalid)?;
        let (operator, args) = rest.split_once('(').ok_or_else(invalid)?;
        let args = args.strip_suffix(')').ok_or_else(invalid)?;
        let negate = match operator {
            "equal" => false,
            "notEqual" => true,
            _ => return Err(invalid()),
        };
        // Values are JSON scalars, so the argument list parses as a JSON array.
        let values: Vec<Value> = serde_json::from_str(&format!("[{args}]")).map_err(|_| invalid())?;
        Ok(Self {
            attribute: attribute.to_string(),
            negate,
            values,
        })
    }

    fn matches(&self, document: &Document) -> bool {
        let hit = document
            .data
            .get(&self.attribute)
            .is_some_and(|value| self.values.contains(value));
        hit != self.negate
    }
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            x.as_f64().partial_cmp(&y.as_f64()).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

async fn list_documents(
    State(db): State<Db>,
    Path((database_id, collection_id)): Path<(String, String)>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<DocumentList>, ServerError> {
    let options = ListOptions::parse(pairs)?;
    let filters = options
        .queries
        .iter()
        .map(String::as_str)
        .map(Filter::parse)
        .collect::<Result<Vec<_>, _>>()?;

    let store = db.read().await;
    let mut documents: Vec<Document> = store
        .get(&(database_id, collection_id))
        .map(|c| c.ordered().into_iter().cloned().collect())
        .unwrap_or_default();
    documents.retain(|doc| filters.iter().all(|f| f.matches(doc)));

    if !options.order_attributes.is_empty() {
        documents.sort_by(|a, b| options.ordering(a, b));
    } else if options.order_types.first().map(String::as_str) == Some("DESC") {
        // no attribute: the direction applies to insertion order
        documents.reverse();
    }

    let total = documents.len();
    let limit = options.limit.unwrap_or(DEFAULT_LIMIT);
    let page = match &options.cursor {
        Some(cursor) => {
            let index = documents.iter().position(|d| &d.id == cursor).ok_or_else(|| {
                ServerError::bad_request(
                    "general_cursor_not_found",
                    format!("Document '{cursor}' for the 'cursor' value not found."),
                )
            })?;
            if options.before {
                let end = index.saturating_sub(options.offset);
                let start = end.saturating_sub(limit);
                documents[start..end].to_vec()
            } else {
                documents.into_iter().skip(index + 1 + options.offset).take(limit).collect()
            }
        }
        None => documents.into_iter().skip(options.offset).take(limit).collect(),
    };

    debug!("list -> {} of {total}", page.len());
    Ok(Json(DocumentList { total, documents: page }))
}

async fn create_document(
    State(db): State<Db>,
    Path((database_id, collection_id)): Path<(String, String)>,
    Json(input): Json<CreateDocument>,
) -> Result<(StatusCode, Json<Document>), ServerError> {
    let id = if input.document_id == "unique()" {
        Uuid::new_v4().simple().to_string()[..20].to_string()
    } else {
        input.document_id
    };

    let mut store = db.write().await;
    let collection = store.entry((database_id, collection_id.clone())).or_default();
    if collection.documents.contains_key(&id) {
        return Err(ServerError::conflict());
    }

    let stamp = now();
    let document = Document {
        id: id.clone(),
        collection: collection_id,
        read: input.read.unwrap_or_default(),
        write: input.write.unwrap_or_default(),
        created_at: stamp,
        updated_at: stamp,
        data: input.data,
    };
    collection.order.push(id.clone());
    collection.documents.insert(id, document.clone());
    Ok((StatusCode::CREATED, Json(document)))
}

async fn get_document(
    State(db): State<Db>,
    Path((database_id, collection_id, document_id)): Path<(String, String, String)>,
) -> Result<Json<Document>, ServerError> {
    let store = db.read().await;
    store
        .get(&(database_id, collection_id))
        .and_then(|c| c.documents.get(&document_id))
        .cloned()
        .map(Json)
        .ok_or_else(ServerError::not_found)
}

async fn update_document(
    State(db): State<Db>,
    Path((database_id, collection_id, document_id)): Path<(String, String, String)>,
    Json(input): Json<UpdateDocument>,
) -> Result<Json<Document>, ServerError> {
    let mut store = db.write().await;
    let document = store
        .get_mut(&(database_id, collection_id))
        .and_then(|c| c.documents.get_mut(&document_id))
        .ok_or_else(ServerError::not_found)?;

    for (key, value) in input.data {
        if !key.starts_with('$') {
            document.data.insert(key, value);
        }
    }
    if let Some(read) = input.read {
        document.read = read;
    }
    if let Some(write) = input.write {
        document.write = write;
    }
    document.updated_at = now();
    Ok(Json(document.clone()))
}

async fn delete_document(
    State(db): State<Db>,
    Path((database_id, collection_id, document_id)): Path<(String, String, String)>,
) -> Result<StatusCode, ServerError> {
    let mut store = db.write().await;
    let collection = store
        .get_mut(&(database_id, collection_id))
        .ok_or_else(ServerError::not_found)?;
    collection.documents.remove(&document_id).ok_or_else(ServerError::not_found)?;
    collection.order.retain(|id| id != &document_id);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, data: Value) -> Document {
        Document {
            id: id.to_string(),
            collection: "col1".to_string(),
            read: Vec::new(),
            write: Vec::new(),
            created_at: 0,
            updated_at: 0,
            data: data.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn document_serializes_flat() {
        let json = serde_json::to_value(doc("d1", json!({"text": "hi"}))).unwrap();
        assert_eq!(json["$id"], "d1");
        assert_eq!(json["$collection"], "col1");
        assert_eq!(json["text"], "hi");
    }

    #[test]
    fn create_input_requires_document_id() {
        let result: Result<CreateDocument, _> = serde_json::from_str(r#"{"data":{}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_input_fields_are_optional() {
        let input: UpdateDocument = serde_json::from_str("{}").unwrap();
        assert!(input.data.is_empty());
        assert!(input.read.is_none());
    }

    #[test]
    fn list_options_accept_bracketed_keys() {
        let options = ListOptions::parse(vec![
            ("queries[]".to_string(), "a.equal(1)".to_string()),
            ("limit".to_string(), "5".to_string()),
            ("cursorDirection".to_string(), "before".to_string()),
            ("orderTypes[]".to_string(), "DESC".to_string()),
        ])
        .unwrap();
        assert_eq!(options.queries, vec!["a.equal(1)"]);
        assert_eq!(options.limit, Some(5));
        assert!(options.before);
        assert_eq!(options.order_types, vec!["DESC"]);
    }

    #[test]
    fn ordering_falls_through_to_later_attributes() {
        let doc = |id: &str, a: i64, b: i64| Document {
            id: id.to_string(),
            collection: "col1".to_string(),
            read: Vec::new(),
            write: Vec::new(),
            created_at: 0,
            updated_at: 0,
            data: json!({"a": a, "b": b}).as_object().cloned().unwrap_or_default(),
        };
        let options = ListOptions::parse(vec![
            ("orderAttributes[]".to_string(), "a".to_string()),
            ("orderAttributes[]".to_string(), "b".to_string()),
            ("orderTypes[]".to_string(), "ASC".to_string()),
            ("orderTypes[]".to_string(), "DESC".to_string()),
        ])
        .unwrap();

        let mut docs = vec![doc("x1", 1, 1), doc("x2", 1, 2), doc("x3", 0, 5)];
        docs.sort_by(|a, b| options.ordering(a, b));
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["x3", "x2", "x1"]);
    }

    #[test]
    fn list_options_reject_bad_limit() {
        let err = ListOptions::parse(vec![("limit".to_string(), "many".to_string())]).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn filters_match_equal_and_not_equal() {
        let ada = doc("d1", json!({"user": "ada", "n": 2}));
        assert!(Filter::parse(r#"user.equal("ada","bob")"#).unwrap().matches(&ada));
        assert!(!Filter::parse(r#"user.notEqual("ada")"#).unwrap().matches(&ada));
        assert!(Filter::parse("n.equal(2)").unwrap().matches(&ada));
        assert!(Filter::parse("n.greater(2)").is_err());
    }
}
