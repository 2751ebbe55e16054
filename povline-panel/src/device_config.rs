//! Device-wide configuration
//!
//! Loaded once at startup into an editable [`ConfigDraft`]. Saving sends the
//! full field set and causes the device to restart, so a successful save
//! puts the manager into a restart-pending state until the host
//! acknowledges it.

use povline_api::{DeviceConfig, PovClient, SaveConfigRequest};
use tracing::{info, warn};

use crate::error::PanelError;

/// Editable copy of the device configuration
///
/// The Wi-Fi password starts empty because the device never reports it.
/// Whatever is in the draft at save time is sent and stored as is, so saving
/// with an empty password clears the one on the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDraft {
    pub device_name: String,
    pub num_leds: u16,
    pub wifi_ssid: String,
    pub wifi_password: String,
    pub mqtt_enabled: bool,
    pub mqtt_broker: String,
    pub mqtt_port: u16,
}

impl From<&DeviceConfig> for ConfigDraft {
    fn from(config: &DeviceConfig) -> Self {
        Self {
            device_name: config.device_name.clone(),
            num_leds: config.num_leds,
            wifi_ssid: config.wifi_ssid.clone(),
            wifi_password: String::new(),
            mqtt_enabled: config.mqtt_enabled,
            mqtt_broker: config.mqtt_broker.clone(),
            mqtt_port: config.mqtt_port,
        }
    }
}

impl ConfigDraft {
    fn split(self) -> (DeviceConfig, String) {
        let config = DeviceConfig {
            device_name: self.device_name,
            num_leds: self.num_leds,
            wifi_ssid: self.wifi_ssid,
            mqtt_enabled: self.mqtt_enabled,
            mqtt_broker: self.mqtt_broker,
            mqtt_port: self.mqtt_port,
        };
        (config, self.wifi_password)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The device accepted the configuration and is restarting
    RestartPending,
}

pub const RESTART_NOTICE: &str = "Configuration saved. Device is restarting...";

#[derive(Debug)]
pub struct ConfigManager {
    client: PovClient,
    loaded: Option<DeviceConfig>,
    restart_pending: bool,
}

impl ConfigManager {
    pub fn new(client: PovClient) -> Self {
        Self {
            client,
            loaded: None,
            restart_pending: false,
        }
    }

    /// Fetch the configuration from the device
    pub async fn load(&mut self) -> Result<&DeviceConfig, PanelError> {
        let config = self.client.config().await.map_err(|e| {
            warn!(error = %e, "config load failed");
            e
        })?;
        info!(device = %config.device_name, "device configuration loaded");
        Ok(&*self.loaded.insert(config))
    }

    /// The last loaded (or saved) configuration
    pub fn config(&self) -> Option<&DeviceConfig> {
        self.loaded.as_ref()
    }

    /// A fresh editable draft of the loaded configuration
    pub fn draft(&self) -> Result<ConfigDraft, PanelError> {
        self.loaded
            .as_ref()
            .map(ConfigDraft::from)
            .ok_or(PanelError::ConfigNotLoaded)
    }

    /// Send the draft to the device
    ///
    /// Invalid drafts are rejected before anything is sent.
    pub async fn save(&mut self, draft: ConfigDraft) -> Result<SaveOutcome, PanelError> {
        let (config, wifi_password) = draft.split();
        let request = SaveConfigRequest::new(config.clone(), wifi_password);

        self.client.save_config(request).await.map_err(|e| {
            warn!(error = %e, "config save failed");
            e
        })?;

        info!(device = %config.device_name, "configuration saved, device restarting");
        self.loaded = Some(config);
        self.restart_pending = true;
        Ok(SaveOutcome::RestartPending)
    }

    pub fn restart_pending(&self) -> bool {
        self.restart_pending
    }

    /// Operator-facing notice while a restart is pending
    pub fn restart_notice(&self) -> Option<&'static str> {
        self.restart_pending.then_some(RESTART_NOTICE)
    }

    /// Clear the restart-pending state once the device is back
    pub fn acknowledge_restart(&mut self) {
        self.restart_pending = false;
    }
}
