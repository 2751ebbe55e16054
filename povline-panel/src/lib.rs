//! Control-panel core for POV-Line LED displays
//!
//! Everything a front end (web, terminal or otherwise) needs to drive a
//! POV-Line device, minus the rendering:
//!
//! - [`StatusPoller`] / [`PollScheduler`]: periodic status snapshots
//!   published through a [`StatusWatcher`]
//! - [`ImageAssetManager`]: listing, upload, selection, playback and deletion
//! - [`SettingsSynchronizer`]: optimistic speed, brightness, loop and
//!   orientation updates
//! - [`EffectDispatcher`]: effects with an optional color
//! - [`ConfigManager`]: device configuration load and save
//!
//! [`ControlPanel`] bundles them around one [`povline_api::PovClient`].
//! Logging goes through `tracing`; hosts choose a subscriber with
//! [`init_logging`].

pub mod config;
pub mod device_config;
pub mod effects;
pub mod error;
pub mod images;
pub mod logging;
pub mod panel;
pub mod poller;
pub mod settings;
pub mod status;

pub use config::PanelConfig;
pub use device_config::{ConfigDraft, ConfigManager, SaveOutcome};
pub use effects::EffectDispatcher;
pub use error::PanelError;
pub use images::{AssetListing, DeleteOutcome, ImageAssetManager, StorageUsage, UploadProgress};
pub use logging::{init_logging, init_logging_from_env, is_initialized, LoggingMode};
pub use panel::ControlPanel;
pub use poller::{PollOutcome, PollScheduler, PollStats, StatusPoller, StatusWatcher};
pub use settings::{SettingsSynchronizer, SettingsView, SyncOutcome};
pub use status::{StatusView, NOT_CONFIGURED, NO_IMAGE};

// Re-export the API types that appear in this crate's signatures
pub use povline_api::{
    ApiError, DeviceConfig, Effect, ImageAsset, ImageFormat, Orientation, PlaybackState, Rgb,
};
