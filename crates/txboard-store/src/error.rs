//! Error types for transaction sources

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Unauthorized: {body}")]
    Unauthorized { body: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Seed file error: {message}")]
    Seed { message: String },

    /// Failure injected by a test double
    #[error("Injected failure: {message}")]
    Injected { message: String },
}

impl StoreError {
    /// Map a non-success HTTP status and body to a store error
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => StoreError::Unauthorized { body },
            _ => StoreError::Http { status, body },
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            StoreError::Decode { message: error.to_string() }
        } else {
            StoreError::Network { message: error.to_string() }
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        StoreError::Decode { message: error.to_string() }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
