pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod storage;

pub use config::{AppConfig, DatabaseConfig, DatadumpConfig, IngestConfig};
pub use error::{ExitCode, LoaderError, Result};
pub use models::*;

pub use ingest::{run_pipeline, LoadReport, Phase, PipelineReport, RecordError, UNKNOWN_AUTHOR};
pub use storage::database::{open_database, open_in_memory, ConnectionPool, Database};
pub use storage::repositories::{
    AuthorRepository, BookRepository, Repository, SqliteAuthorRepository, SqliteBookRepository,
};
