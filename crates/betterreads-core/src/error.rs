use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort an operation in betterreads-core.
///
/// Per-line problems inside a dump are reported as
/// [`RecordError`](crate::ingest::RecordError) instead and never surface here.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Dump file not found: {}", .0.display())]
    DumpNotFound(PathBuf),

    #[error("Author not found: {0}")]
    AuthorNotFound(String),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Process exit codes used by the `betterreads` binary.
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    NotFound = 2,
    FileSystemError = 4,
}

impl LoaderError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            LoaderError::AuthorNotFound(_) | LoaderError::BookNotFound(_) => ExitCode::NotFound,
            LoaderError::DumpNotFound(_) | LoaderError::Io(_) => ExitCode::FileSystemError,
            _ => ExitCode::GeneralError,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoaderError>;
