//! Playback settings with optimistic local state
//!
//! Each setter updates [`SettingsView`] first and then sends exactly one
//! field to the device. A failed send is logged and reported as
//! [`SyncOutcome::Diverged`]; the local value is kept and the next status
//! poll shows what the device really has.
//!
//! Until the operator changes something, the view follows the first status
//! snapshot the poller publishes, however late it arrives.

use povline_api::types::{MAX_SPEED, MIN_SPEED};
use povline_api::{Orientation, PovClient, SettingsUpdate};
use tracing::{debug, warn};

use crate::poller::StatusWatcher;
use crate::status::StatusView;

/// Locally held playback settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsView {
    pub speed: u16,
    pub brightness: u8,
    pub loop_mode: bool,
    pub orientation: Orientation,
}

impl Default for SettingsView {
    fn default() -> Self {
        Self {
            speed: 30,
            brightness: 51,
            loop_mode: true,
            orientation: Orientation::Vertical,
        }
    }
}

impl From<&StatusView> for SettingsView {
    fn from(status: &StatusView) -> Self {
        Self {
            speed: status.speed.clamp(MIN_SPEED, MAX_SPEED),
            brightness: status.brightness,
            loop_mode: status.loop_mode,
            orientation: status.orientation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Acknowledged,
    /// The device did not accept the change; carries the failure text
    Diverged(String),
}

impl SyncOutcome {
    pub fn is_acknowledged(&self) -> bool {
        matches!(self, SyncOutcome::Acknowledged)
    }
}

#[derive(Debug)]
pub struct SettingsSynchronizer {
    client: PovClient,
    view: SettingsView,
    seeded: bool,
    status: Option<StatusWatcher>,
}

impl SettingsSynchronizer {
    pub fn new(client: PovClient) -> Self {
        Self {
            client,
            view: SettingsView::default(),
            seeded: false,
            status: None,
        }
    }

    /// Seed from `status` as soon as it carries a snapshot
    pub fn watching(mut self, status: StatusWatcher) -> Self {
        self.status = Some(status);
        self
    }

    /// Current settings
    ///
    /// While unseeded this reflects the latest published status, if any.
    pub fn view(&self) -> SettingsView {
        if !self.seeded {
            if let Some(status) = self.published_status() {
                return SettingsView::from(&status);
            }
        }
        self.view
    }

    fn published_status(&self) -> Option<StatusView> {
        self.status.as_ref().and_then(StatusWatcher::current)
    }

    fn catch_up(&mut self) {
        if let Some(status) = self.published_status() {
            self.seed(&status);
        }
    }

    /// Take initial values from the first status snapshot
    ///
    /// Ignored once seeded or once the operator has changed anything.
    /// Returns whether the view was updated.
    pub fn seed(&mut self, status: &StatusView) -> bool {
        if self.seeded {
            return false;
        }
        self.view = SettingsView::from(status);
        self.seeded = true;
        debug!(view = ?self.view, "settings seeded from status");
        true
    }

    /// Set playback speed, clamped to the device's accepted range
    pub async fn set_speed(&mut self, speed: u16) -> SyncOutcome {
        self.catch_up();
        let speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        self.view.speed = speed;
        self.push("speed", SettingsUpdate::new().with_speed(speed)).await
    }

    pub async fn set_brightness(&mut self, brightness: u8) -> SyncOutcome {
        self.catch_up();
        self.view.brightness = brightness;
        self.push("brightness", SettingsUpdate::new().with_brightness(brightness))
            .await
    }

    pub async fn set_loop(&mut self, loop_mode: bool) -> SyncOutcome {
        self.catch_up();
        self.view.loop_mode = loop_mode;
        self.push("loop", SettingsUpdate::new().with_loop_mode(loop_mode))
            .await
    }

    pub async fn set_orientation(&mut self, orientation: Orientation) -> SyncOutcome {
        self.catch_up();
        self.view.orientation = orientation;
        self.push("orientation", SettingsUpdate::new().with_orientation(orientation))
            .await
    }

    async fn push(&mut self, field: &'static str, update: SettingsUpdate) -> SyncOutcome {
        self.seeded = true;
        match self.client.update_settings(update).await {
            Ok(()) => {
                debug!(field, "setting acknowledged");
                SyncOutcome::Acknowledged
            }
            Err(e) => {
                warn!(field, error = %e, "setting not applied on device, local value kept");
                SyncOutcome::Diverged(e.to_string())
            }
        }
    }
}
