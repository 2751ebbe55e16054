//! Stored image management
//!
//! Keeps the last known listing, the operator's selection and the state of
//! the most recent upload. The device is authoritative: every successful
//! upload or delete is followed by a fresh listing.

use povline_api::operations::validate_upload;
use povline_api::{ImageAsset, ImageCatalog, ImageFormat, PovClient, UploadImageRequest};
use tracing::{debug, info, warn};

use crate::error::PanelError;

/// Last known image listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AssetListing {
    /// No listing has been fetched yet
    #[default]
    NotLoaded,
    /// The device has no images stored
    Empty,
    Available(Vec<ImageAsset>),
}

impl AssetListing {
    fn from_images(images: Vec<ImageAsset>) -> Self {
        if images.is_empty() {
            AssetListing::Empty
        } else {
            AssetListing::Available(images)
        }
    }

    pub fn assets(&self) -> &[ImageAsset] {
        match self {
            AssetListing::Available(images) => images,
            _ => &[],
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.assets().iter().any(|asset| asset.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.assets().iter().map(|asset| asset.name.as_str()).collect()
    }
}

/// Storage figures reported alongside the listing, in bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageUsage {
    pub free: Option<u64>,
    pub total: Option<u64>,
}

/// State of the most recent upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UploadProgress {
    #[default]
    Idle,
    Uploading { file_name: String },
    Done { file_name: String },
    Failed { file_name: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The confirmation callback declined; nothing was sent
    Cancelled,
}

#[derive(Debug)]
pub struct ImageAssetManager {
    client: PovClient,
    listing: AssetListing,
    storage: StorageUsage,
    selected: Option<String>,
    upload: UploadProgress,
}

impl ImageAssetManager {
    pub fn new(client: PovClient) -> Self {
        Self {
            client,
            listing: AssetListing::NotLoaded,
            storage: StorageUsage::default(),
            selected: None,
            upload: UploadProgress::Idle,
        }
    }

    pub fn listing(&self) -> &AssetListing {
        &self.listing
    }

    pub fn storage(&self) -> StorageUsage {
        self.storage
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn upload_progress(&self) -> &UploadProgress {
        &self.upload
    }

    /// Replace the listing with what the device currently holds
    ///
    /// A selection that no longer appears in the new listing is cleared.
    /// On failure the previous listing is kept.
    pub async fn refresh(&mut self) -> Result<&AssetListing, PanelError> {
        let catalog = self.client.images().await.map_err(|e| {
            warn!(error = %e, "image listing failed");
            e
        })?;
        self.apply_catalog(catalog);
        Ok(&self.listing)
    }

    fn apply_catalog(&mut self, catalog: ImageCatalog) {
        self.storage = StorageUsage {
            free: catalog.free_space,
            total: catalog.total_space,
        };
        self.listing = AssetListing::from_images(catalog.images);
        debug!(count = self.listing.assets().len(), "image listing refreshed");

        if let Some(name) = &self.selected {
            if !self.listing.contains(name) {
                info!(image = %name, "selected image no longer on device, clearing selection");
                self.selected = None;
            }
        }
    }

    /// Check a candidate file locally, without contacting the device
    pub fn validate_candidate(file_name: &str, size: usize) -> Result<ImageFormat, PanelError> {
        Ok(validate_upload(file_name, size)?)
    }

    /// Upload an image, then refresh the listing
    ///
    /// Candidates that fail local validation are rejected before any
    /// network call and leave the upload state untouched.
    pub async fn upload(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<ImageFormat, PanelError> {
        let format = Self::validate_candidate(file_name, bytes.len()).map_err(|e| {
            info!(file = %file_name, error = %e, "upload rejected locally");
            e
        })?;

        self.upload = UploadProgress::Uploading {
            file_name: file_name.to_string(),
        };

        match self
            .client
            .upload_image(UploadImageRequest::new(file_name, bytes))
            .await
        {
            Ok(()) => {
                info!(file = %file_name, %format, "image uploaded");
                self.upload = UploadProgress::Done {
                    file_name: file_name.to_string(),
                };
                if let Err(e) = self.refresh().await {
                    warn!(error = %e, "listing refresh after upload failed");
                }
                Ok(format)
            }
            Err(e) => {
                let error = PanelError::from(e);
                warn!(file = %file_name, error = %error, "image upload failed");
                self.upload = UploadProgress::Failed {
                    file_name: file_name.to_string(),
                    reason: error.notice_text(),
                };
                Err(error)
            }
        }
    }

    /// Mark an image as the one to play; local only
    pub fn select(&mut self, name: impl Into<String>) {
        let name = name.into();
        debug!(image = %name, "image selected");
        self.selected = Some(name);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Start playback of the selected image
    ///
    /// Fails with [`PanelError::NoImageSelected`] and sends nothing when no
    /// image is selected.
    pub async fn play(&self) -> Result<(), PanelError> {
        let image = self.selected.as_deref().ok_or(PanelError::NoImageSelected)?;
        self.client.play(image).await.map_err(|e| {
            warn!(image = %image, error = %e, "play failed");
            e
        })?;
        info!(image = %image, "playback started");
        Ok(())
    }

    /// Delete an image after `confirm` agrees
    ///
    /// `confirm` receives the image name and is called exactly once. A
    /// selection naming the deleted image is cleared, and the listing is
    /// refreshed.
    pub async fn delete<F>(&mut self, name: &str, confirm: F) -> Result<DeleteOutcome, PanelError>
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(name) {
            debug!(image = %name, "delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        self.client.delete_image(name).await.map_err(|e| {
            warn!(image = %name, error = %e, "delete failed");
            e
        })?;
        info!(image = %name, "image deleted");

        if self.selected.as_deref() == Some(name) {
            self.selected = None;
        }
        if let Err(e) = self.refresh().await {
            warn!(error = %e, "listing refresh after delete failed");
        }

        Ok(DeleteOutcome::Deleted)
    }
}
