// src/utils/error.rs
use thiserror::Error;

/// Errors from the document-fetch collaborator. Any of these short-circuit
/// the pipeline before the extractor runs.
#[derive(Error, Debug)]
pub enum DocError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 403 Forbidden, 500

    #[error("Document not found: {0}")]
    NotFound(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Document fetch failed: {0}")]
    Doc(#[from] DocError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
