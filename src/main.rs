//! Writes two demo batches to a table, redirecting the one its validator rejects to the
//! table's error table, then prints both tables.

use clap::Parser;
use ingestor::display::ShowOptions;
use ingestor::ingest::request::IngestRequest;
use ingestor::ingest::{Ingestor, WriteOutcome};
use ingestor::reader::TableReader;
use ingestor::session::config::SessionConfig;
use ingestor::session::Session;
use ingestor::storage::batch::RecordBatch;
use ingestor::storage::row::Row;
use ingestor::types::column_type::ColumnType;
use ingestor::types::column_value::ColumnValue;
use ingestor::{row, rows, schema};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const NULL_MESSAGES: &str = "SELECT COUNT(*) FROM <TABLE_NAME> WHERE message IS NULL;";

#[derive(Parser)]
#[command(name = "ingestor")]
#[command(about = "Batch ingestion with error-table redirection")]
struct Cli {
    /// Warehouse root holding one directory per database
    #[arg(long, env = "INGESTOR_WAREHOUSE")]
    warehouse: Option<PathBuf>,

    /// Database name
    #[arg(long, env = "INGESTOR_DB", default_value = "hudidb")]
    db: String,

    /// Table name
    #[arg(long, default_value = "events")]
    table: String,

    /// Application name attached to the session
    #[arg(long, default_value = "ingestor")]
    app_name: String,

    /// Rows shown per table
    #[arg(long, default_value_t = 20)]
    show_rows: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = SessionConfig::default()
        .with_app_name(&cli.app_name)
        .with_show_rows(cli.show_rows);
    if let Some(warehouse) = cli.warehouse {
        config = config.with_warehouse(warehouse);
    }
    let session = Session::new(config);
    let ingestor = Ingestor::new(&session);
    let request = IngestRequest::new(&cli.db, &cli.table, "uuid", "precomb")
        .with_partition_field("partition")
        .with_validator(NULL_MESSAGES);

    let batches = [
        events(rows![
            [1, "This is APPEND 1", 111, "1"],
            [2, "This is APPEND 2", 222, "2"]
        ])?,
        events(vec![
            row![4, ColumnValue::Null, 444, ColumnValue::Null],
            row![5, "This is APPEND 5", 555, "5"],
        ])?,
    ];

    for batch in &batches {
        println!("{}", batch.show(ShowOptions::default()));
        match ingestor.write(batch, &request)? {
            WriteOutcome::Committed(summary) => {
                println!("Committed {} at {}", summary.table_name, summary.instant)
            }
            WriteOutcome::Redirected {
                error_table,
                reason,
                ..
            } => println!("UPSERT Items into Error Table {} ({})", error_table, reason),
        }
    }

    let reader = TableReader::new(&session);
    for table_name in [cli.table.clone(), request.error_table_name()] {
        println!("\nReading table {}", table_name);
        println!("{}", reader.render(&cli.db, &table_name)?);
    }
    Ok(())
}

fn events(rows: Vec<Row>) -> anyhow::Result<RecordBatch> {
    let schema = schema![
        "uuid" => ColumnType::Int,
        "message" => ColumnType::Text,
        "precomb" => ColumnType::Int,
        "partition" => ColumnType::Text
    ]?;
    Ok(RecordBatch::try_new(schema, rows)?)
}
