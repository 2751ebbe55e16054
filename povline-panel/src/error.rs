use povline_api::{ApiError, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("No image selected")]
    NoImageSelected,

    #[error("Device configuration has not been loaded")]
    ConfigNotLoaded,

    #[error("Status polling is already running")]
    PollingActive,

    #[error("Status poller task failed: {0}")]
    PollerTask(String),

    #[error("Status watcher closed")]
    WatcherClosed,

    #[error("Invalid panel configuration: {0}")]
    Config(String),
}

impl PanelError {
    /// Whether the failure was caught before anything was sent to the device
    pub fn is_validation(&self) -> bool {
        match self {
            PanelError::Validation(_) | PanelError::NoImageSelected => true,
            PanelError::Api(error) => error.is_validation(),
            _ => false,
        }
    }

    /// Text to show the operator
    ///
    /// Device-reported failures are passed through verbatim.
    pub fn notice_text(&self) -> String {
        match self {
            PanelError::Api(ApiError::DeviceError(message)) => message.clone(),
            PanelError::NoImageSelected => "Select an image before starting playback".to_string(),
            other => other.to_string(),
        }
    }
}
