use http_client::HttpError;
use thiserror::Error;

use crate::operation::ValidationError;

/// High-level API errors for POV-Line operations
///
/// This enum provides domain-specific error types that abstract away the underlying
/// HTTP details and give meaningful information for the failure scenarios a
/// control panel has to report.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network communication error
    ///
    /// The device is unreachable, the connection dropped mid-request, or the
    /// device URL is unusable.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Response parsing error
    ///
    /// The device answered but the JSON body did not have the expected shape.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Non-success HTTP status without a decodable body
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// The device processed the command and reported `success: false`
    ///
    /// Carries the device's own error text unchanged.
    #[error("Device error: {0}")]
    DeviceError(String),

    /// Invalid parameter value
    ///
    /// Returned before any request is sent when a typed request fails validation.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ApiError {
    /// Whether this error was detected locally, before contacting the device
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::InvalidParameter(_))
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Network(msg) => ApiError::NetworkError(msg),
            HttpError::InvalidUrl(msg) => ApiError::NetworkError(format!("invalid URL: {}", msg)),
            HttpError::Parse(msg) => ApiError::ParseError(msg),
            HttpError::Status(code) => ApiError::HttpStatus(code),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::InvalidParameter(error.to_string())
    }
}
