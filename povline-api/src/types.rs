//! Wire types returned by the device
//!
//! Field names follow the device's JSON (camelCase, with `wifiSSID` and
//! `wifiIP` spelled out). Status fields are all optional: the device may
//! omit any of them and a missing field must never fail a poll.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{ApiError, Result};
use crate::operation::ValidationError;

/// Largest file the device accepts for upload, in bytes
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024;

/// Accepted upload extensions (matched case-insensitively)
pub const ALLOWED_EXTENSIONS: [&str; 3] = [".bmp", ".rgb", ".565"];

/// Column playback rate bounds accepted by the device (columns per second)
pub const MIN_SPEED: u16 = 1;
pub const MAX_SPEED: u16 = 120;

/// LED strip length bounds accepted by the device
pub const MIN_LEDS: u16 = 1;
pub const MAX_LEDS: u16 = 300;

/// Playback state reported by the device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
    Stopped,
    /// Any state string this client does not know about
    #[serde(other)]
    Unknown,
}

impl PlaybackState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Stopped => "stopped",
            PlaybackState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image orientation transform applied on the device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Vertical => "vertical",
            Orientation::Horizontal => "horizontal",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "vertical" => Ok(Orientation::Vertical),
            "horizontal" => Ok(Orientation::Horizontal),
            other => Err(ValidationError::invalid_value(
                "orientation",
                other,
                "expected 'vertical' or 'horizontal'",
            )),
        }
    }
}

/// Complete status snapshot as returned by `GET /api/status`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceStatus {
    pub state: Option<PlaybackState>,
    pub image: Option<String>,
    pub column: Option<u32>,
    pub total_columns: Option<u32>,
    pub speed: Option<u16>,
    pub measured_fps: Option<f32>,
    pub brightness: Option<u8>,
    pub loop_mode: Option<bool>,
    pub orientation: Option<Orientation>,
    /// Sweep direction, e.g. `left_to_right`
    pub direction: Option<String>,
    pub led_type: Option<String>,
    pub num_leds: Option<u16>,
    pub effect_running: Option<bool>,
    pub wifi_connected: Option<bool>,
    #[serde(rename = "wifiSSID")]
    pub wifi_ssid: Option<String>,
    #[serde(rename = "wifiIP")]
    pub wifi_ip: Option<String>,
    /// Free image storage in bytes
    pub free_space: Option<u64>,
}

/// Binary pixel format of a stored image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ImageFormat {
    #[serde(rename = "BMP")]
    Bmp,
    #[serde(rename = "RGB")]
    Rgb,
    #[serde(rename = "RGB565")]
    Rgb565,
}

impl ImageFormat {
    /// Detect the format from a file name's extension, ignoring case
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let lower = file_name.to_ascii_lowercase();
        if lower.ends_with(".bmp") {
            Some(ImageFormat::Bmp)
        } else if lower.ends_with(".rgb") {
            Some(ImageFormat::Rgb)
        } else if lower.ends_with(".565") {
            Some(ImageFormat::Rgb565)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Bmp => "BMP",
            ImageFormat::Rgb => "RGB",
            ImageFormat::Rgb565 => "RGB565",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stored image
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageAsset {
    /// Unique, case-sensitive key
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// File size in bytes
    pub size: u64,
    pub format: ImageFormat,
}

/// `GET /api/images` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCatalog {
    #[serde(default)]
    pub images: Vec<ImageAsset>,
    #[serde(default)]
    pub free_space: Option<u64>,
    #[serde(default)]
    pub total_space: Option<u64>,
}

impl ImageCatalog {
    pub fn contains(&self, name: &str) -> bool {
        self.images.iter().any(|image| image.name == name)
    }
}

fn default_num_leds() -> u16 {
    144
}

fn default_mqtt_port() -> u16 {
    1883
}

/// Device-wide configuration as returned by `GET /api/config`
///
/// The Wi-Fi password is write-only: the device never returns it, so it is
/// not part of this type and only appears on [`crate::operations::SaveConfigRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceConfig {
    #[serde(default)]
    pub device_name: String,
    #[serde(default = "default_num_leds")]
    pub num_leds: u16,
    #[serde(rename = "wifiSSID", default)]
    pub wifi_ssid: String,
    #[serde(default)]
    pub mqtt_enabled: bool,
    #[serde(default)]
    pub mqtt_broker: String,
    #[serde(default = "default_mqtt_port")]
    pub mqtt_port: u16,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device_name: String::new(),
            num_leds: default_num_leds(),
            wifi_ssid: String::new(),
            mqtt_enabled: false,
            mqtt_broker: String::new(),
            mqtt_port: default_mqtt_port(),
        }
    }
}

/// `GET /api/effects` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EffectList {
    #[serde(default)]
    pub effects: Vec<String>,
}

/// Reply to every write operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WriteAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl WriteAck {
    /// Turn `success: false` into [`ApiError::DeviceError`] carrying the device's text
    pub fn into_result(self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::DeviceError(
                self.error
                    .unwrap_or_else(|| "device reported failure without a message".to_string()),
            ))
        }
    }
}
