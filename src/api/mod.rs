//! Remote service abstraction layer.
//!
//! `PixupApi` is the only way the rest of the crate talks to the storage and
//! enhancement endpoints. `services/` calls through it and never builds HTTP
//! requests itself, so tests can swap in a fake and a different provider only
//! needs a new implementation here.

use std::sync::Arc;

use crate::config::Destination;
use crate::models::image::ImagePayload;
use crate::services::progress::ProgressReporter;

#[derive(Debug)]
pub struct UploadParams {
    pub payload: ImagePayload,
    /// Storage key, `{prefix}-{unix_millis}`.
    pub public_id: String,
    pub destination: Destination,
    pub progress: Option<Arc<ProgressReporter>>,
}

pub trait PixupApi: Send + Sync {
    /// Store an image and return its durable URL.
    ///
    /// Implementations feed transmitted byte counts into `params.progress`.
    fn upload_image(
        &self,
        params: UploadParams,
    ) -> impl std::future::Future<Output = crate::error::Result<String>> + Send;

    /// Ask the enhancement service to process `source_url` and return the
    /// resulting image bytes.
    fn fetch_enhanced(
        &self,
        source_url: &str,
    ) -> impl std::future::Future<Output = crate::error::Result<ImagePayload>> + Send;

    /// Plain GET of an image, used for downloads.
    fn fetch_image(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = crate::error::Result<ImagePayload>> + Send;
}

pub mod v1;

#[cfg(test)]
pub(crate) mod fake;
