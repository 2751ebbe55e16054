//! Operation framework for the device REST surface
//!
//! Every endpoint the device exposes is modelled as a type implementing
//! [`DeviceOperation`]:
//! - a typed request that validates itself before anything is sent
//! - a fixed method and path
//! - an encoder turning the request into a form body, a file part, or nothing
//! - a JSON response type

mod form;
pub mod macros;

pub use form::FormFields;

use http_client::FilePart;
use serde::de::DeserializeOwned;

/// HTTP method used by an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Encoded request payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// No payload (all reads, and commands such as pause/stop)
    Empty,
    /// `application/x-www-form-urlencoded` fields
    Form(FormFields),
    /// A single multipart file part
    File(FilePart),
}

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Parameter '{parameter}' value '{value}' is out of range ({min}..={max})")]
    RangeError {
        parameter: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("Parameter '{parameter}' value '{value}' is invalid: {reason}")]
    InvalidValue {
        parameter: String,
        value: String,
        reason: String,
    },

    #[error("Required parameter '{parameter}' is missing")]
    MissingParameter { parameter: String },

    #[error("Parameter '{parameter}' failed validation: {message}")]
    Custom { parameter: String, message: String },
}

impl ValidationError {
    pub fn range_error(parameter: &str, min: impl std::fmt::Display, max: impl std::fmt::Display, value: impl std::fmt::Display) -> Self {
        Self::RangeError {
            parameter: parameter.to_string(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub fn invalid_value(parameter: &str, value: impl std::fmt::Display, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn missing(parameter: &str) -> Self {
        Self::MissingParameter {
            parameter: parameter.to_string(),
        }
    }

    /// Name of the parameter (the rule) that failed
    pub fn parameter(&self) -> &str {
        match self {
            Self::RangeError { parameter, .. }
            | Self::InvalidValue { parameter, .. }
            | Self::MissingParameter { parameter }
            | Self::Custom { parameter, .. } => parameter,
        }
    }
}

/// Trait for request types that can be checked before they are sent
pub trait Validate {
    /// Check the request against the device's accepted bounds
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(()) // Default: nothing to check
    }
}

/// Base trait for all device operations
///
/// # Example
///
/// ```rust,ignore
/// let ack = client.execute::<PlayOperation>(PlayRequest::new("sunset.bmp")).await?;
/// ack.into_result()?;
/// ```
pub trait DeviceOperation {
    /// The request type for this operation
    type Request: Validate;

    /// The response type for this operation, decoded from JSON
    type Response: DeserializeOwned;

    /// The HTTP method this operation uses
    const METHOD: Method;

    /// The endpoint path relative to the device root
    const PATH: &'static str;

    /// Turn a validated request into its wire payload
    fn encode(request: Self::Request) -> RequestBody;

    /// Get human-readable operation metadata
    ///
    /// This is useful for debugging and logging
    fn metadata() -> OperationMetadata {
        OperationMetadata {
            method: Self::METHOD,
            path: Self::PATH,
        }
    }
}

/// Metadata about a device operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationMetadata {
    pub method: Method,
    pub path: &'static str,
}

impl std::fmt::Display for OperationMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method.as_str(), self.path)
    }
}
