//! Device configuration read and atomic save
//!
//! The save endpoint has no partial mode: every field is sent on every save,
//! and the device restarts once it has applied them.

use crate::define_simple_operation;
use crate::operation::{DeviceOperation, FormFields, Method, RequestBody, Validate, ValidationError};
use crate::types::{DeviceConfig, WriteAck, MAX_LEDS, MIN_LEDS};

define_simple_operation! {
    operation: GetConfigOperation,
    method: Get,
    path: "/api/config",
    response: DeviceConfig,
}

/// Full configuration save, including the write-only Wi-Fi password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveConfigRequest {
    pub config: DeviceConfig,
    /// Sent as-is; empty unless the operator typed one in
    pub wifi_password: String,
}

impl SaveConfigRequest {
    pub fn new(config: DeviceConfig, wifi_password: impl Into<String>) -> Self {
        Self {
            config,
            wifi_password: wifi_password.into(),
        }
    }

    /// The exact form field list the device will receive
    pub fn to_fields(&self) -> FormFields {
        let config = &self.config;
        FormFields::new()
            .field("deviceName", &config.device_name)
            .field("numLeds", config.num_leds)
            .field("wifiSSID", &config.wifi_ssid)
            .field("wifiPassword", &self.wifi_password)
            .field("mqttEnabled", config.mqtt_enabled)
            .field("mqttBroker", &config.mqtt_broker)
            .field("mqttPort", config.mqtt_port)
    }
}

impl Validate for SaveConfigRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let num_leds = self.config.num_leds;
        if !(MIN_LEDS..=MAX_LEDS).contains(&num_leds) {
            return Err(ValidationError::range_error("numLeds", MIN_LEDS, MAX_LEDS, num_leds));
        }
        if self.config.mqtt_port == 0 {
            return Err(ValidationError::range_error("mqttPort", 1, u16::MAX, 0));
        }
        Ok(())
    }
}

/// `POST /api/config`
pub struct SaveConfigOperation;

impl DeviceOperation for SaveConfigOperation {
    type Request = SaveConfigRequest;
    type Response = WriteAck;

    const METHOD: Method = Method::Post;
    const PATH: &'static str = "/api/config";

    fn encode(request: Self::Request) -> RequestBody {
        RequestBody::Form(request.to_fields())
    }
}
