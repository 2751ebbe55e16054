//! Configuration for the control panel
//!
//! Controls which device the panel talks to, how often it polls, and the
//! initial color handed to color effects.

use std::time::Duration;

use crate::error::PanelError;

/// Configuration for a [`crate::ControlPanel`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    /// Base URL of the device
    /// Default: `http://192.168.4.1` (the device's own access point)
    pub device_url: String,

    /// Interval between status polls
    /// Default: 2 seconds
    pub poll_interval: Duration,

    /// Initial `#RRGGBB` color for solid/chase effects
    /// Default: `#ff0000`
    pub effect_color: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            device_url: "http://192.168.4.1".to_string(),
            poll_interval: Duration::from_secs(2),
            effect_color: "#ff0000".to_string(),
        }
    }
}

impl PanelConfig {
    /// Create a config for the device at `device_url` with default settings
    pub fn new(device_url: impl Into<String>) -> Self {
        Self {
            device_url: device_url.into(),
            ..Default::default()
        }
    }

    /// Create a config tuned for a bench setup with a close, idle device
    pub fn fast_polling(device_url: impl Into<String>) -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            ..Self::new(device_url)
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_effect_color(mut self, color: impl Into<String>) -> Self {
        self.effect_color = color.into();
        self
    }

    /// Build a config from the process environment
    ///
    /// - `POVLINE_DEVICE_URL`: device base URL
    /// - `POVLINE_POLL_INTERVAL_MS`: poll interval in milliseconds (> 0)
    /// - `POVLINE_EFFECT_COLOR`: initial effect color
    pub fn from_env() -> Result<Self, PanelError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, falling back to defaults for missing keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PanelError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("POVLINE_DEVICE_URL") {
            config.device_url = url;
        }

        if let Some(raw) = lookup("POVLINE_POLL_INTERVAL_MS") {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                PanelError::Config(format!("POVLINE_POLL_INTERVAL_MS must be an integer, got '{}'", raw))
            })?;
            if millis == 0 {
                return Err(PanelError::Config(
                    "POVLINE_POLL_INTERVAL_MS must be greater than zero".to_string(),
                ));
            }
            config.poll_interval = Duration::from_millis(millis);
        }

        if let Some(color) = lookup("POVLINE_EFFECT_COLOR") {
            config.effect_color = color;
        }

        Ok(config)
    }
}
