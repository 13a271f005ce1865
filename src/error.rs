//! Error types for the satellite image service

use axum::http::StatusCode;
use std::io;
use thiserror::Error;

/// Result type for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while serving an image request
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid process configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request parameters rejected before any processing
    #[error("{0}")]
    Validation(String),

    /// Area cannot be turned into a buffer radius
    #[error("Area must be a positive number of hectares, got {0}")]
    InvalidArea(f64),

    /// Neither archive holds a scene for the region and dates
    #[error("No suitable satellite images found for the specified criteria.")]
    NoImagery,

    /// Token minting failed or the remote platform rejected our credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Remote platform answered with an error status
    #[error("Earth Engine request failed ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed JSON payload
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// HTTP status reported to the caller for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) | Error::InvalidArea(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(error: config::ConfigError) -> Self {
        Error::Configuration(error.to_string())
    }
}
