//! PixupApiV1 — HTTP implementation of `PixupApi`.
//!
//! Uploads go to a Cloudinary-style unsigned upload endpoint as multipart
//! forms; enhancement is a GET against a remini-style endpoint that answers
//! with raw image bytes.

use std::sync::Arc;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::header::CONTENT_TYPE;

use super::{PixupApi, UploadParams};
use crate::config::Config;
use crate::error::AppError;
use crate::models::image::ImagePayload;
use crate::services::progress::ProgressReporter;

const USER_AGENT: &str = concat!("pixup/", env!("CARGO_PKG_VERSION"));

/// Size of the slices the upload body is streamed in; progress granularity.
pub const UPLOAD_SLICE_SIZE: usize = 64 * 1024;

pub struct PixupApiV1 {
    client: reqwest::Client,
    enhance_endpoint: String,
}

impl PixupApiV1 {
    pub fn new(config: &Config) -> crate::error::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            enhance_endpoint: config.enhance_endpoint.clone(),
        })
    }

    /// `{endpoint}?url={percent-encoded source}`.
    pub(crate) fn enhance_request_url(
        endpoint: &str,
        source_url: &str,
    ) -> crate::error::Result<reqwest::Url> {
        reqwest::Url::parse_with_params(endpoint, &[("url", source_url)])
            .map_err(|e| AppError::Internal(format!("Invalid enhance endpoint {}: {}", endpoint, e)))
    }

    /// Pull `secure_url` out of the storage service's JSON answer.
    pub(crate) fn extract_secure_url(body: &serde_json::Value) -> crate::error::Result<String> {
        body["secure_url"]
            .as_str()
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::Api(format!("Upload response missing secure_url: {}", body)))
    }

    async fn get_image(&self, url: reqwest::Url) -> crate::error::Result<ImagePayload> {
        let resp = self.client.get(url).send().await?.error_for_status()?;
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let data = resp.bytes().await?;
        Ok(ImagePayload::new(data, content_type.as_deref()))
    }
}

/// Split `data` into slices and count each one as sent when the body pulls it.
pub(crate) fn progress_stream(
    data: Bytes,
    progress: Option<Arc<ProgressReporter>>,
) -> impl Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static {
    let slices: Vec<Bytes> = (0..data.len())
        .step_by(UPLOAD_SLICE_SIZE)
        .map(|start| data.slice(start..(start + UPLOAD_SLICE_SIZE).min(data.len())))
        .collect();
    futures::stream::iter(slices).map(move |slice| {
        if let Some(reporter) = &progress {
            reporter.advance(slice.len() as u64);
        }
        Ok(slice)
    })
}

impl PixupApi for PixupApiV1 {
    async fn upload_image(&self, params: UploadParams) -> crate::error::Result<String> {
        let UploadParams {
            payload,
            public_id,
            destination,
            progress,
        } = params;

        let total = payload.len();
        let body = reqwest::Body::wrap_stream(progress_stream(payload.data, progress));
        let file_part = reqwest::multipart::Part::stream_with_length(body, total)
            .file_name(public_id.clone())
            .mime_str(&payload.content_type)
            .map_err(|e| AppError::Internal(format!("MIME parse error: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("upload_preset", destination.upload_preset.clone())
            .text("public_id", public_id);

        let url = destination.upload_url();
        log::debug!("Uploading {} bytes to {}", total, url);
        let resp = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = resp.json().await?;
        Self::extract_secure_url(&body)
    }

    async fn fetch_enhanced(&self, source_url: &str) -> crate::error::Result<ImagePayload> {
        let url = Self::enhance_request_url(&self.enhance_endpoint, source_url)?;
        log::debug!("Requesting enhancement for {}", source_url);
        self.get_image(url).await
    }

    async fn fetch_image(&self, url: &str) -> crate::error::Result<ImagePayload> {
        let url = reqwest::Url::parse(url)
            .map_err(|e| AppError::InvalidInput(format!("Invalid URL {}: {}", url, e)))?;
        self.get_image(url).await
    }
}
