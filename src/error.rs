//! Error taxonomy for generation and corpus analysis
//!
//! Every failure is fatal for the run: callers propagate with `?` and the
//! binary reports the message and exits non-zero.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building, reading or analyzing a path corpus
#[derive(Error, Debug)]
pub enum SendaError {
    #[error("Input not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("Missing required column(s): {}", missing.join(", "))]
    SchemaValidation { missing: Vec<String> },

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Malformed {field} on line {line}: {value:?}")]
    MalformedValue {
        line: usize,
        field: String,
        value: String,
    },

    #[error("Template has {symbols} symbols but {timestamps} timestamps were sampled")]
    TemplateLengthMismatch { symbols: usize, timestamps: usize },

    #[error("Event for id {event_id} cannot join the path of id {path_id}")]
    ForeignEvent { path_id: u64, event_id: u64 },

    #[error("Corpus holds more than one path for id {id}")]
    DuplicatePath { id: u64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SendaError>;
