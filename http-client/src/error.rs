//! Error types for the HTTP transport

use thiserror::Error;

/// Errors that can occur while talking to the device over HTTP
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network or HTTP communication error
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// JSON body could not be decoded into the expected shape
    #[error("JSON parsing error: {0}")]
    Parse(String),

    /// Non-success HTTP status whose body could not be decoded
    #[error("HTTP status {0}")]
    Status(u16),

    /// The base URL or request path could not be turned into a URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
