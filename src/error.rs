//! Error types for the command catalog and its collaborators.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

/// Violations of the catalog's record invariants.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate command id: {0}")]
    DuplicateId(String),

    #[error("command '{id}' has an empty {field}")]
    EmptyField { id: String, field: &'static str },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExportError {
    #[error("no commands to export")]
    NoCommands,

    #[error("invalid script name {0:?}: use letters, digits, '.', '_' or '-'")]
    InvalidName(String),
}

#[derive(Error, Debug)]
pub enum SuggestError {
    #[error("text generation provider is not configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider returned no content")]
    EmptyResponse,

    #[error("malformed provider output: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
