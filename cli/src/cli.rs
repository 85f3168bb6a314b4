use clap::{Parser, Subcommand, ValueEnum};
use docstore_core::config;
use docstore_core::{
    ClientConfig, CreateDocument, CursorDirection, DeleteDocument, GetDocument, Id, ListDocuments, OrderType,
    UpdateDocument,
};
use serde_json::Value;

#[derive(Parser, Debug, Clone)]
#[command(name = "docstore", about = "Command-line client for the documents API", version)]
pub struct Cli {
    /// API endpoint, e.g. https://cloud.example.com/v1
    #[arg(long, env = config::ENV_ENDPOINT)]
    pub endpoint: String,

    /// Project id sent with every request
    #[arg(long, env = config::ENV_PROJECT)]
    pub project: String,

    /// Server API key
    #[arg(long, env = config::ENV_KEY, hide_env_values = true)]
    pub key: Option<String>,

    /// Session JWT
    #[arg(long, env = config::ENV_JWT, hide_env_values = true)]
    pub jwt: Option<String>,

    #[arg(long, env = config::ENV_LOCALE)]
    pub locale: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(&self.endpoint, &self.project);
        if let Some(key) = &self.key {
            config = config.with_key(key);
        }
        if let Some(jwt) = &self.jwt {
            config = config.with_jwt(jwt);
        }
        if let Some(locale) = &self.locale {
            config = config.with_locale(locale);
        }
        config
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List documents of a collection
    List {
        database: String,
        collection: String,
        /// Filter such as `user.equal("ada")`; repeatable
        #[arg(long = "query")]
        queries: Vec<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
        /// Document id to paginate from
        #[arg(long)]
        cursor: Option<String>,
        #[arg(long, value_enum)]
        cursor_direction: Option<Direction>,
        #[arg(long = "order-attribute")]
        order_attributes: Vec<String>,
        #[arg(long = "order-type", value_enum)]
        order_types: Vec<Order>,
    },
    /// Create a document
    Create {
        database: String,
        collection: String,
        /// Custom fields as a JSON object
        #[arg(long)]
        data: String,
        /// Document id; generated by the server when omitted
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        read: Vec<String>,
        #[arg(long)]
        write: Vec<String>,
    },
    /// Fetch one document
    Get {
        database: String,
        collection: String,
        document: String,
    },
    /// Change fields or permissions of a document
    Update {
        database: String,
        collection: String,
        document: String,
        /// Fields to change as a JSON object
        #[arg(long)]
        data: String,
        #[arg(long)]
        read: Vec<String>,
        #[arg(long)]
        write: Vec<String>,
    },
    /// Delete a document
    Delete {
        database: String,
        collection: String,
        document: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Before,
    After,
}

impl From<Direction> for CursorDirection {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Before => CursorDirection::Before,
            Direction::After => CursorDirection::After,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl From<Order> for OrderType {
    fn from(value: Order) -> Self {
        match value {
            Order::Asc => OrderType::Asc,
            Order::Desc => OrderType::Desc,
        }
    }
}

// Repeatable flags that were never given stay absent from the payload.
fn present<T>(values: Vec<T>) -> Option<Vec<T>> {
    (!values.is_empty()).then_some(values)
}

#[allow(clippy::too_many_arguments)]
pub fn list_params(
    database: String,
    collection: String,
    queries: Vec<String>,
    limit: Option<u32>,
    offset: Option<u32>,
    cursor: Option<String>,
    cursor_direction: Option<Direction>,
    order_attributes: Vec<String>,
    order_types: Vec<Order>,
) -> ListDocuments {
    ListDocuments {
        queries: present(queries),
        limit,
        offset,
        cursor,
        cursor_direction: cursor_direction.map(Into::into),
        order_attributes: present(order_attributes),
        order_types: present(order_types).map(|types| types.into_iter().map(Into::into).collect()),
        ..ListDocuments::new(database, collection)
    }
}

pub fn create_params(
    database: String,
    collection: String,
    id: Option<String>,
    data: Value,
    read: Vec<String>,
    write: Vec<String>,
) -> CreateDocument<Value> {
    CreateDocument {
        read: present(read),
        write: present(write),
        ..CreateDocument::new(database, collection, id.unwrap_or_else(Id::unique), data)
    }
}

pub fn update_params(
    database: String,
    collection: String,
    document: String,
    data: Value,
    read: Vec<String>,
    write: Vec<String>,
) -> UpdateDocument<Value> {
    UpdateDocument {
        read: present(read),
        write: present(write),
        ..UpdateDocument::new(database, collection, document, data)
    }
}

pub fn document_params(database: String, collection: String, document: String) -> GetDocument {
    DeleteDocument::new(database, collection, document)
}
