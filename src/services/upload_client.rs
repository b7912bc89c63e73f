//! Upload client — stores one image and returns its durable URL.
//!
//! Whatever goes wrong underneath (transport, non-2xx, malformed answer) is
//! logged and reported as `AppError::UploadFailed`. No retry.

use std::sync::Arc;

use crate::api::{PixupApi, UploadParams};
use crate::config::Destination;
use crate::error::AppError;
use crate::models::events::EventSender;
use crate::models::image::ImagePayload;
use crate::services::progress::ProgressReporter;

/// Name prefix for user-supplied originals.
pub const ORIGINAL_PREFIX: &str = "original";

/// Storage key: the prefix plus the current time keeps repeated uploads apart.
pub fn public_id(name_prefix: &str, unix_millis: i64) -> String {
    format!("{}-{}", name_prefix, unix_millis)
}

pub async fn upload<A: PixupApi>(
    api: &A,
    payload: ImagePayload,
    name_prefix: &str,
    destination: &Destination,
    progress: Option<&EventSender>,
) -> crate::error::Result<String> {
    let public_id = public_id(name_prefix, chrono::Utc::now().timestamp_millis());
    let reporter = progress.map(|tx| Arc::new(ProgressReporter::new(payload.len(), tx.clone())));

    let params = UploadParams {
        payload,
        public_id,
        destination: destination.clone(),
        progress: reporter,
    };

    match api.upload_image(params).await {
        Ok(url) if !url.is_empty() => Ok(url),
        Ok(_) => {
            log::error!("Upload error: storage service returned an empty URL");
            Err(AppError::UploadFailed)
        }
        Err(e) => {
            log::error!("Upload error: {}", e);
            Err(AppError::UploadFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::models::events::{self, PipelineEvent};

    fn destination() -> Destination {
        Destination {
            base_url: "https://api.example".into(),
            cloud_name: "demo".into(),
            upload_preset: "unsigned".into(),
        }
    }

    #[test]
    fn public_id_combines_prefix_and_time() {
        assert_eq!(public_id("original", 1_760_000_000_123), "original-1760000000123");
    }

    #[tokio::test]
    async fn upload_returns_durable_url_and_reports_progress() {
        let api = FakeApi::new();
        let (tx, mut rx) = events::channel();
        let payload = ImagePayload::new(vec![0u8; 10 * 1024], Some("image/jpeg"));

        let url = upload(&api, payload, ORIGINAL_PREFIX, &destination(), Some(&tx))
            .await
            .unwrap();
        assert_eq!(url, "https://store/original-1.jpg");

        let uploads = api.uploads();
        assert_eq!(uploads.len(), 1);
        assert!(uploads[0].public_id.starts_with("original-"));
        assert_eq!(uploads[0].size, 10 * 1024);
        assert_eq!(uploads[0].preset, "unsigned");

        let mut progress = Vec::new();
        while let Ok(PipelineEvent::Progress(p)) = rx.try_recv() {
            progress.push(p);
        }
        assert_eq!(progress, vec![50, 100]);
    }

    #[tokio::test]
    async fn upload_failure_is_generic() {
        let api = FakeApi {
            fail_upload: Some(("original", 500)),
            ..FakeApi::new()
        };
        let payload = ImagePayload::new(vec![1u8; 16], None);
        let err = upload(&api, payload, ORIGINAL_PREFIX, &destination(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UploadFailed));
        assert_eq!(err.to_string(), "Failed to upload image");
    }
}
