//! Upload adapter for the external image host.
//!
//! Forwards binary payloads to a Cloudinary-style upload endpoint and
//! returns the resulting public URLs in submission order. The whole
//! batch fails if any single upload fails. Credentials are optional at
//! startup; an unconfigured adapter fails closed.

use futures::future::try_join_all;
use reqwest::multipart::{Form, Part};

use crate::config::ImageHostConfig;

/// Upload adapter error
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Upload service is not configured")]
    NotConfigured,
    #[error("Upload request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Image host response missing secure_url")]
    MissingUrl,
}

/// A file payload lifted out of a multipart request
#[derive(Debug)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Upload service
pub struct UploadService {
    client: reqwest::Client,
    config: Option<ImageHostConfig>,
}

impl UploadService {
    pub fn new(config: Option<ImageHostConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Upload a batch of files concurrently.
    ///
    /// Returned URLs match the order the files were submitted in.
    pub async fn upload_batch(&self, files: Vec<UploadFile>) -> Result<Vec<String>, UploadError> {
        if files.is_empty() {
            return Ok(Vec::new());
        }
        let config = self.config.as_ref().ok_or(UploadError::NotConfigured)?;

        let uploads = files.into_iter().map(|file| self.upload_one(config, file));
        try_join_all(uploads).await
    }

    async fn upload_one(
        &self,
        config: &ImageHostConfig,
        file: UploadFile,
    ) -> Result<String, UploadError> {
        let part = Part::bytes(file.bytes)
            .file_name(file.filename)
            .mime_str(&file.content_type)?;
        let form = Form::new()
            .text("upload_preset", config.upload_preset.clone())
            .part("file", part);

        let response = self
            .client
            .post(format!(
                "https://api.cloudinary.com/v1_1/{}/image/upload",
                config.cloud_name
            ))
            .basic_auth(&config.api_key, Some(&config.api_secret))
            .multipart(form)
            .send()
            .await?;

        let body: serde_json::Value = response.json().await?;
        body.get("secure_url")
            .and_then(|v| v.as_str())
            .map(str::to_owned)
            .ok_or(UploadError::MissingUrl)
    }
}
