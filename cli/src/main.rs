mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use docstore_core::{Databases, Document, DocumentList, Transport};
use flexi_logger::Logger;
use log::info;
use serde_json::Value;

use crate::cli::{create_params, document_params, list_params, update_params, Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _logger = Logger::try_with_str(&cli.log_level)
        .context("invalid log level")?
        .log_to_stderr()
        .start()
        .context("failed to start logger")?;

    info!("Using endpoint {} for project {}", cli.endpoint, cli.project);
    let databases = Databases::with_reqwest(cli.config());

    let output = run(&databases, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run<T: Transport>(databases: &Databases<T>, command: Command) -> Result<Value> {
    let output = match command {
        Command::List {
            database,
            collection,
            queries,
            limit,
            offset,
            cursor,
            cursor_direction,
            order_attributes,
            order_types,
        } => {
            let params = list_params(
                database,
                collection,
                queries,
                limit,
                offset,
                cursor,
                cursor_direction,
                order_attributes,
                order_types,
            );
            let list: DocumentList = databases.list_documents(&params).await?;
            serde_json::to_value(list)?
        }
        Command::Create {
            database,
            collection,
            data,
            id,
            read,
            write,
        } => {
            let data = parse_data(&data)?;
            let params = create_params(database, collection, id, data, read, write);
            let document: Document = databases.create_document(&params).await?;
            serde_json::to_value(document)?
        }
        Command::Get {
            database,
            collection,
            document,
        } => {
            let params = document_params(database, collection, document);
            let document: Document = databases.get_document(&params).await?;
            serde_json::to_value(document)?
        }
        Command::Update {
            database,
            collection,
            document,
            data,
            read,
            write,
        } => {
            let data = parse_data(&data)?;
            let params = update_params(database, collection, document, data, read, write);
            let document: Document = databases.update_document(&params).await?;
            serde_json::to_value(document)?
        }
        Command::Delete {
            database,
            collection,
            document,
        } => {
            let params = document_params(database, collection, document);
            databases.delete_document(&params).await?;
            serde_json::json!({ "deleted": params.document_id })
        }
    };
    Ok(output)
}

fn parse_data(raw: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(raw).context("--data must be valid JSON")?;
    anyhow::ensure!(value.is_object(), "--data must be a JSON object");
    Ok(value)
}
