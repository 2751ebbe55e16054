//! High-level API for POV-Line device control
//!
//! This crate provides a type-safe, trait-based API for the REST surface of
//! a POV-Line persistence-of-vision LED controller. It uses the private
//! `http-client` crate for the low-level HTTP exchange.
//!
//! ```rust,no_run
//! use povline_api::{Effect, EffectRequest, PovClient, Rgb, SettingsUpdate};
//!
//! # async fn run() -> povline_api::Result<()> {
//! let client = PovClient::new("http://192.168.4.1")?;
//!
//! // Only the speed field is sent; brightness, loop and orientation stay as they are
//! client.update_settings(SettingsUpdate::new().with_speed(45)).await?;
//!
//! client
//!     .apply_effect(EffectRequest::colored(Effect::Solid, Rgb::from_hex("#ff00a0")?))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod effect;
pub mod error;
pub mod operation;
pub mod operations;
pub mod types;

pub use client::PovClient;
pub use effect::{Effect, Rgb};
pub use error::{ApiError, Result};
pub use operation::{DeviceOperation, FormFields, Validate, ValidationError};
pub use operations::{EffectRequest, SaveConfigRequest, SettingsUpdate, UploadImageRequest};
pub use types::{
    DeviceConfig, DeviceStatus, ImageAsset, ImageCatalog, ImageFormat, Orientation,
    PlaybackState, WriteAck,
};
