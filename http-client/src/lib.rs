//! Private HTTP transport for POV-Line device communication
//!
//! This crate provides a minimal JSON-over-HTTP client specifically designed
//! for the small REST surface exposed by the POV-Line controller. Reads are
//! plain GETs; commands are form-encoded POSTs, and image uploads are a single
//! multipart POST.
//!
//! Reads and writes decode response bodies differently: a read only succeeds
//! on a 2xx status, while a write body is decoded whatever the status, because
//! the device reports command failures as `{"error": "..."}` with a 4xx/5xx code.

mod error;

pub use error::HttpError;

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// A file ready to be sent as a multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Multipart field name (the device expects `file`)
    pub field: &'static str,
    /// File name reported in the part's `Content-Disposition`
    pub file_name: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

/// A minimal HTTP client bound to one device base URL
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a client for the device reachable at `base_url`
    /// (e.g. `http://192.168.4.1`)
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client that reuses an existing `reqwest::Client`
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, HttpError> {
        let base_url = Url::parse(base_url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(HttpError::InvalidUrl(format!("{} cannot be a base URL", base_url)));
        }
        Ok(Self { client, base_url })
    }

    /// The device base URL this client talks to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET `path` and decode the JSON body; non-2xx statuses are errors
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        let url = self.url(path)?;
        debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| HttpError::Parse(e.to_string()))
    }

    /// POST a form-encoded body and decode the JSON reply
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: &[(&str, String)],
    ) -> Result<T, HttpError> {
        let url = self.url(path)?;
        debug!(%url, fields = fields.len(), "POST form");

        let response = self
            .client
            .post(url)
            .form(fields)
            .send()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;

        Self::decode_reply(response).await
    }

    /// POST with no body at all and decode the JSON reply
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        let url = self.url(path)?;
        debug!(%url, "POST");

        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;

        Self::decode_reply(response).await
    }

    /// POST a single file as `multipart/form-data` and decode the JSON reply
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        file: FilePart,
    ) -> Result<T, HttpError> {
        let url = self.url(path)?;
        debug!(%url, file = %file.file_name, bytes = file.bytes.len(), "POST multipart");

        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str("application/octet-stream")
            .map_err(|e| HttpError::Network(e.to_string()))?;
        let form = Form::new().part(file.field, part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;

        Self::decode_reply(response).await
    }

    fn url(&self, path: &str) -> Result<Url, HttpError> {
        self.base_url
            .join(path)
            .map_err(|e| HttpError::InvalidUrl(e.to_string()))
    }

    async fn decode_reply<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, HttpError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(HttpError::Status(status.as_u16())),
            Err(e) => Err(HttpError::Parse(e.to_string())),
        }
    }
}
