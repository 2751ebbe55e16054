//! Display-ready status snapshot
//!
//! [`StatusView`] is what a front end renders. Unlike the wire
//! [`DeviceStatus`], every field has a value: numbers default to zero,
//! booleans to `false`, and missing or empty strings to a sentinel.

use povline_api::{DeviceStatus, Orientation, PlaybackState};

/// Shown for Wi-Fi fields the device did not report
pub const NOT_CONFIGURED: &str = "none configured";

/// Shown when no image is loaded
pub const NO_IMAGE: &str = "none";

#[derive(Debug, Clone, PartialEq)]
pub struct StatusView {
    pub state: PlaybackState,
    pub image: String,
    /// Whether the device reported an image at all; `image` alone cannot
    /// tell a missing image from one named like [`NO_IMAGE`]
    pub image_loaded: bool,
    pub column: u32,
    pub total_columns: u32,
    pub speed: u16,
    pub measured_fps: f32,
    pub brightness: u8,
    pub loop_mode: bool,
    pub orientation: Orientation,
    pub num_leds: u16,
    pub effect_running: bool,
    pub wifi_connected: bool,
    pub wifi_ssid: String,
    pub wifi_ip: String,
    /// Free image storage in bytes
    pub free_space: u64,
}

impl Default for StatusView {
    fn default() -> Self {
        StatusView::from(DeviceStatus::default())
    }
}

impl From<DeviceStatus> for StatusView {
    fn from(status: DeviceStatus) -> Self {
        let image_loaded = status.image.as_deref().is_some_and(|name| !name.is_empty());
        Self {
            state: status.state.unwrap_or_default(),
            image: or_sentinel(status.image, NO_IMAGE),
            image_loaded,
            column: status.column.unwrap_or(0),
            total_columns: status.total_columns.unwrap_or(0),
            speed: status.speed.unwrap_or(0),
            measured_fps: status.measured_fps.unwrap_or(0.0),
            brightness: status.brightness.unwrap_or(0),
            loop_mode: status.loop_mode.unwrap_or(false),
            orientation: status.orientation.unwrap_or_default(),
            num_leds: status.num_leds.unwrap_or(0),
            effect_running: status.effect_running.unwrap_or(false),
            wifi_connected: status.wifi_connected.unwrap_or(false),
            wifi_ssid: or_sentinel(status.wifi_ssid, NOT_CONFIGURED),
            wifi_ip: or_sentinel(status.wifi_ip, NOT_CONFIGURED),
            free_space: status.free_space.unwrap_or(0),
        }
    }
}

fn or_sentinel(value: Option<String>, sentinel: &str) -> String {
    match value {
        Some(text) if !text.is_empty() => text,
        _ => sentinel.to_string(),
    }
}

impl StatusView {
    /// Whether the device reports a loaded image
    pub fn has_image(&self) -> bool {
        self.image_loaded
    }

    /// Free storage in whole kilobytes, rounded to nearest
    pub fn free_space_kb(&self) -> u64 {
        self.free_space.saturating_add(512) / 1024
    }

    /// Playback progress through the current image, if it has columns
    pub fn progress(&self) -> Option<f32> {
        if self.total_columns == 0 {
            None
        } else {
            Some(self.column as f32 / self.total_columns as f32)
        }
    }

    /// `column/total` as shown next to the image name
    pub fn column_label(&self) -> String {
        format!("{}/{}", self.column, self.total_columns)
    }
}
