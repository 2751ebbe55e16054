//! The control panel
//!
//! [`ControlPanel`] owns one client per device and every component built on
//! it. It is the only place that starts or stops background polling.

use povline_api::PovClient;
use tracing::{info, warn};

use crate::config::PanelConfig;
use crate::device_config::ConfigManager;
use crate::effects::EffectDispatcher;
use crate::error::PanelError;
use crate::images::ImageAssetManager;
use crate::poller::{PollOutcome, PollScheduler, StatusPoller, StatusWatcher};
use crate::settings::SettingsSynchronizer;
use crate::status::StatusView;

#[derive(Debug)]
enum Polling {
    Idle(StatusPoller),
    Running(PollScheduler),
}

/// Everything a front end needs to drive one device
///
/// # Example
/// ```rust,no_run
/// use povline_panel::{ControlPanel, PanelConfig};
///
/// # async fn run() -> Result<(), povline_panel::PanelError> {
/// let mut panel = ControlPanel::new(PanelConfig::new("http://192.168.4.1"))?;
/// panel.start().await?;
///
/// panel.images.select("sunset.bmp");
/// panel.play().await?;
///
/// if let Some(status) = panel.status() {
///     println!("{} {}", status.state, status.column_label());
/// }
///
/// panel.shutdown().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ControlPanel {
    config: PanelConfig,
    client: PovClient,
    watcher: StatusWatcher,
    polling: Option<Polling>,

    pub images: ImageAssetManager,
    pub settings: SettingsSynchronizer,
    pub effects: EffectDispatcher,
    pub device_config: ConfigManager,
}

impl ControlPanel {
    pub fn new(config: PanelConfig) -> Result<Self, PanelError> {
        let client = PovClient::new(&config.device_url)?;
        Ok(Self::with_client(config, client))
    }

    /// Build a panel around an existing client; `config.device_url` is not used
    pub fn with_client(config: PanelConfig, client: PovClient) -> Self {
        let poller = StatusPoller::new(client.clone());
        let watcher = poller.subscribe();

        Self {
            images: ImageAssetManager::new(client.clone()),
            settings: SettingsSynchronizer::new(client.clone()).watching(watcher.clone()),
            effects: EffectDispatcher::new(client.clone(), config.effect_color.clone()),
            device_config: ConfigManager::new(client.clone()),
            polling: Some(Polling::Idle(poller)),
            watcher,
            client,
            config,
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn client(&self) -> &PovClient {
        &self.client
    }

    /// Initial load, then background polling
    ///
    /// Fetches status, the image listing and the device configuration once,
    /// then starts the poll scheduler. A failed initial fetch is logged and
    /// does not stop the others. Settings pick up the first status snapshot
    /// whenever it arrives, from this fetch or a later poll.
    pub async fn start(&mut self) -> Result<(), PanelError> {
        info!(device = %self.client.base_url(), "starting control panel");

        self.refresh_status().await?;
        if let Err(e) = self.images.refresh().await {
            warn!(error = %e, "initial image listing unavailable");
        }
        if let Err(e) = self.device_config.load().await {
            warn!(error = %e, "initial device configuration unavailable");
        }

        self.start_polling()
    }

    /// Poll status once in the foreground
    ///
    /// Only allowed while background polling is stopped.
    pub async fn refresh_status(&mut self) -> Result<PollOutcome, PanelError> {
        match self.polling.as_mut() {
            Some(Polling::Idle(poller)) => Ok(poller.poll_once().await),
            _ => Err(PanelError::PollingActive),
        }
    }

    pub fn start_polling(&mut self) -> Result<(), PanelError> {
        match self.polling.take() {
            Some(Polling::Idle(poller)) => {
                let scheduler = PollScheduler::start(poller, self.config.poll_interval);
                self.polling = Some(Polling::Running(scheduler));
                Ok(())
            }
            other => {
                self.polling = other;
                Err(PanelError::PollingActive)
            }
        }
    }

    /// Stop background polling; the last snapshot stays readable
    pub async fn stop_polling(&mut self) -> Result<(), PanelError> {
        match self.polling.take() {
            Some(Polling::Running(scheduler)) => {
                let poller = scheduler.stop().await?;
                self.polling = Some(Polling::Idle(poller));
                Ok(())
            }
            other => {
                self.polling = other;
                Ok(())
            }
        }
    }

    pub fn is_polling(&self) -> bool {
        matches!(self.polling, Some(Polling::Running(_)))
    }

    /// The most recent status snapshot
    pub fn status(&self) -> Option<StatusView> {
        self.watcher.current()
    }

    /// A handle that observes every new status snapshot
    pub fn watch_status(&self) -> StatusWatcher {
        self.watcher.clone()
    }

    /// Play the selected image
    pub async fn play(&self) -> Result<(), PanelError> {
        self.images.play().await
    }

    pub async fn pause(&self) -> Result<(), PanelError> {
        self.client.pause().await.map_err(|e| {
            warn!(error = %e, "pause failed");
            e
        })?;
        info!("playback paused");
        Ok(())
    }

    pub async fn stop(&self) -> Result<(), PanelError> {
        self.client.stop().await.map_err(|e| {
            warn!(error = %e, "stop failed");
            e
        })?;
        info!("playback stopped");
        Ok(())
    }

    /// Stop polling and release the panel
    pub async fn shutdown(mut self) -> Result<(), PanelError> {
        self.stop_polling().await?;
        info!("control panel shut down");
        Ok(())
    }
}
