//! Operation definitions for every device endpoint
//!
//! Reads (`status`, `images`, `config`, `effects`) and the bare commands
//! (`pause`, `stop`) are generated with [`crate::define_simple_operation`];
//! the rest carry typed requests with their own validation and encoding.

pub mod config;
pub mod effects;
pub mod images;
pub mod playback;
pub mod settings;
pub mod status;

pub use config::{
    get_config_operation, GetConfigOperation, GetConfigOperationRequest, SaveConfigOperation,
    SaveConfigRequest,
};
pub use effects::{
    list_effects_operation, ApplyEffectOperation, EffectRequest, ListEffectsOperation,
    ListEffectsOperationRequest,
};
pub use images::{
    list_images_operation, validate_upload, DeleteImageOperation, DeleteImageRequest,
    ListImagesOperation, ListImagesOperationRequest, UploadImageOperation, UploadImageRequest,
};
pub use playback::{
    pause_operation, stop_operation, PauseOperation, PauseOperationRequest, PlayOperation,
    PlayRequest, StopOperation, StopOperationRequest,
};
pub use settings::{SettingsUpdate, UpdateSettingsOperation};
pub use status::{get_status_operation, GetStatusOperation, GetStatusOperationRequest};
