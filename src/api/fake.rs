//! In-memory `PixupApi` for pipeline tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use super::{PixupApi, UploadParams};
use crate::error::AppError;
use crate::models::image::ImagePayload;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedUpload {
    pub public_id: String,
    pub content_type: String,
    pub size: u64,
    pub preset: String,
}

/// Hands out `https://store/{prefix}-{n}.jpg` URLs and records every call.
#[derive(Debug, Default)]
pub(crate) struct FakeApi {
    /// Fail uploads whose public id starts with this prefix, with this status.
    pub fail_upload: Option<(&'static str, u16)>,
    pub fail_enhance: bool,
    pub enhanced_content_type: Option<&'static str>,
    pub counter: AtomicU32,
    pub uploads: Mutex<Vec<RecordedUpload>>,
    pub enhance_requests: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            enhanced_content_type: Some("image/jpeg"),
            ..Default::default()
        }
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn enhance_requests(&self) -> Vec<String> {
        self.enhance_requests.lock().unwrap().clone()
    }
}

impl PixupApi for FakeApi {
    async fn upload_image(&self, params: UploadParams) -> crate::error::Result<String> {
        let prefix = params
            .public_id
            .split('-')
            .next()
            .unwrap_or_default()
            .to_string();
        self.uploads.lock().unwrap().push(RecordedUpload {
            public_id: params.public_id.clone(),
            content_type: params.payload.content_type.clone(),
            size: params.payload.len(),
            preset: params.destination.upload_preset.clone(),
        });

        if let Some((failing, status)) = self.fail_upload {
            if prefix == failing {
                return Err(AppError::Api(format!("status={}: upload rejected", status)));
            }
        }

        if let Some(reporter) = &params.progress {
            let total = params.payload.len();
            reporter.advance(total / 2);
            reporter.advance(total - total / 2);
        }

        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(format!("https://store/{}-{}.jpg", prefix, n))
    }

    async fn fetch_enhanced(&self, source_url: &str) -> crate::error::Result<ImagePayload> {
        self.enhance_requests
            .lock()
            .unwrap()
            .push(source_url.to_string());
        if source_url.contains("slow") {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }
        if self.fail_enhance {
            return Err(AppError::Network("connection reset".into()));
        }
        Ok(ImagePayload::new(vec![0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3], self.enhanced_content_type))
    }

    async fn fetch_image(&self, url: &str) -> crate::error::Result<ImagePayload> {
        if url.contains("missing") {
            return Err(AppError::Api("status=404: not found".into()));
        }
        Ok(ImagePayload::new(vec![0x89, b'P', b'N', b'G'], Some("image/png")))
    }
}
