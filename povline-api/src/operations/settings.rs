//! Partial runtime settings update
//!
//! The device applies whichever of `speed`, `brightness`, `loop` and
//! `orientation` are present and leaves the others alone, so a request must
//! only ever carry the fields the caller actually changed.

use crate::operation::{DeviceOperation, FormFields, Method, RequestBody, Validate, ValidationError};
use crate::types::{Orientation, WriteAck, MAX_SPEED, MIN_SPEED};

/// Optional-field record for `POST /api/settings`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub speed: Option<u16>,
    pub brightness: Option<u8>,
    pub loop_mode: Option<bool>,
    pub orientation: Option<Orientation>,
}

impl SettingsUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_speed(mut self, speed: u16) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = Some(brightness);
        self
    }

    pub fn with_loop_mode(mut self, loop_mode: bool) -> Self {
        self.loop_mode = Some(loop_mode);
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.speed.is_none()
            && self.brightness.is_none()
            && self.loop_mode.is_none()
            && self.orientation.is_none()
    }

    fn to_fields(self) -> FormFields {
        FormFields::new()
            .optional_field("speed", self.speed)
            .optional_field("brightness", self.brightness)
            .optional_field("loop", self.loop_mode)
            .optional_field("orientation", self.orientation)
    }
}

impl Validate for SettingsUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::missing("settings"));
        }
        if let Some(speed) = self.speed {
            if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
                return Err(ValidationError::range_error("speed", MIN_SPEED, MAX_SPEED, speed));
            }
        }
        Ok(())
    }
}

/// `POST /api/settings`
pub struct UpdateSettingsOperation;

impl DeviceOperation for UpdateSettingsOperation {
    type Request = SettingsUpdate;
    type Response = WriteAck;

    const METHOD: Method = Method::Post;
    const PATH: &'static str = "/api/settings";

    fn encode(request: Self::Request) -> RequestBody {
        RequestBody::Form(request.to_fields())
    }
}
