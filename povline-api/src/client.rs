use http_client::HttpClient;
use tracing::debug;

use crate::effect::Effect;
use crate::error::{ApiError, Result};
use crate::operation::{DeviceOperation, Method, RequestBody, Validate};
use crate::operations::{
    get_config_operation, get_status_operation, list_effects_operation, list_images_operation,
    pause_operation, stop_operation, ApplyEffectOperation, DeleteImageOperation,
    DeleteImageRequest, EffectRequest, GetConfigOperation, GetStatusOperation,
    ListEffectsOperation, ListImagesOperation, PauseOperation, PlayOperation, PlayRequest,
    SaveConfigOperation, SaveConfigRequest, SettingsUpdate, StopOperation,
    UpdateSettingsOperation, UploadImageOperation, UploadImageRequest,
};
use crate::types::{DeviceConfig, DeviceStatus, ImageCatalog};

/// A client for executing operations against a POV-Line device
///
/// This client bridges the gap between the stateless operation definitions
/// and actual HTTP requests. Every call is exactly one round trip: there is
/// no retry, no timeout and no caching at this layer; failures go back to
/// the caller.
///
/// # Example
/// ```rust,no_run
/// use povline_api::PovClient;
///
/// # async fn run() -> povline_api::Result<()> {
/// let client = PovClient::new("http://192.168.4.1")?;
/// let status = client.status().await?;
/// println!("device is {:?}", status.state);
/// client.play("sunset.bmp").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PovClient {
    http: HttpClient,
}

impl PovClient {
    /// Create a client for the device at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(base_url)?,
        })
    }

    /// Create a client around a preconfigured HTTP client
    pub fn with_http_client(http: HttpClient) -> Self {
        Self { http }
    }

    /// The device base URL
    pub fn base_url(&self) -> &str {
        self.http.base_url().as_str()
    }

    /// Execute an operation against the device
    ///
    /// The request is validated first; a validation failure returns
    /// [`ApiError::InvalidParameter`] without touching the network.
    pub async fn execute<Op: DeviceOperation>(&self, request: Op::Request) -> Result<Op::Response> {
        request.validate()?;

        let metadata = Op::metadata();
        debug!(operation = %metadata, "dispatching device operation");

        let response = match (Op::METHOD, Op::encode(request)) {
            (Method::Get, RequestBody::Empty) => self.http.get_json(Op::PATH).await?,
            (Method::Get, _) => {
                return Err(ApiError::InvalidParameter(format!(
                    "{} does not take a request body",
                    metadata
                )))
            }
            (Method::Post, RequestBody::Empty) => self.http.post_empty(Op::PATH).await?,
            (Method::Post, RequestBody::Form(fields)) => {
                self.http.post_form(Op::PATH, fields.as_slice()).await?
            }
            (Method::Post, RequestBody::File(file)) => {
                self.http.post_multipart(Op::PATH, file).await?
            }
        };

        Ok(response)
    }

    /// `GET /api/status`
    pub async fn status(&self) -> Result<DeviceStatus> {
        self.execute::<GetStatusOperation>(get_status_operation()).await
    }

    /// `GET /api/images`
    pub async fn images(&self) -> Result<ImageCatalog> {
        self.execute::<ListImagesOperation>(list_images_operation()).await
    }

    /// `GET /api/config`
    pub async fn config(&self) -> Result<DeviceConfig> {
        self.execute::<GetConfigOperation>(get_config_operation()).await
    }

    /// `GET /api/effects`
    pub async fn effects(&self) -> Result<Vec<Effect>> {
        let list = self.execute::<ListEffectsOperation>(list_effects_operation()).await?;
        Ok(list.effects.iter().map(|name| Effect::from(name.as_str())).collect())
    }

    /// `POST /api/play`
    pub async fn play(&self, image: &str) -> Result<()> {
        self.execute::<PlayOperation>(PlayRequest::new(image))
            .await?
            .into_result()
    }

    /// `POST /api/pause`
    pub async fn pause(&self) -> Result<()> {
        self.execute::<PauseOperation>(pause_operation())
            .await?
            .into_result()
    }

    /// `POST /api/stop`
    pub async fn stop(&self) -> Result<()> {
        self.execute::<StopOperation>(stop_operation())
            .await?
            .into_result()
    }

    /// `POST /api/settings` with only the fields present in `update`
    pub async fn update_settings(&self, update: SettingsUpdate) -> Result<()> {
        self.execute::<UpdateSettingsOperation>(update)
            .await?
            .into_result()
    }

    /// `POST /api/image/delete`
    pub async fn delete_image(&self, image: &str) -> Result<()> {
        self.execute::<DeleteImageOperation>(DeleteImageRequest::new(image))
            .await?
            .into_result()
    }

    /// `POST /api/upload`
    pub async fn upload_image(&self, request: UploadImageRequest) -> Result<()> {
        self.execute::<UploadImageOperation>(request)
            .await?
            .into_result()
    }

    /// `POST /api/effect`
    pub async fn apply_effect(&self, request: EffectRequest) -> Result<()> {
        self.execute::<ApplyEffectOperation>(request)
            .await?
            .into_result()
    }

    /// `POST /api/config`; the device restarts after a successful save
    pub async fn save_config(&self, request: SaveConfigRequest) -> Result<()> {
        self.execute::<SaveConfigOperation>(request)
            .await?
            .into_result()
    }
}
