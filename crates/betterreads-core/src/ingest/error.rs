use thiserror::Error;

/// Why a single dump line was skipped.
///
/// These never abort a load; the dump driver logs them with the line number
/// and moves on.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("no JSON object on line")]
    MissingJsonObject,

    #[error("line is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required field `{path}`")]
    MissingField { path: String },

    #[error("field `{path}` is not {expected}")]
    WrongType { path: String, expected: &'static str },

    #[error("record has an empty `key`")]
    EmptyId,

    #[error("cannot parse timestamp {value:?}: {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
