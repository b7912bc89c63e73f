//! Enhancement pipeline — upload (file input only), enhance, record.
//!
//! Each entry point runs its stages in order and stops at the first failure.
//! Progress, stage changes and the final outcome go out on the caller's
//! event channel; the outcome is also returned. Invocations are independent:
//! nothing here serializes two concurrent runs, and records are prepended in
//! completion order.

use std::sync::Arc;

use crate::api::PixupApi;
use crate::config::Destination;
use crate::error::AppError;
use crate::models::events::{EventSender, PipelineEvent, PipelineStage};
use crate::models::history::EnhancementRecord;
use crate::models::image::StagedImage;
use crate::services::{enhance_client, upload_client};
use crate::storage::history::SharedHistory;
use crate::storage::KeyValueStore;

/// Shown for any failure on the URL entry point.
pub const URL_FAILURE_MESSAGE: &str =
    "Failed to enhance image from URL. Please check the URL and try again.";
const FALLBACK_FAILURE_MESSAGE: &str = "Failed to process image. Please try again.";

pub struct Enhancer<A: PixupApi, S: KeyValueStore> {
    api: Arc<A>,
    history: SharedHistory<S>,
    destination: Destination,
}

impl<A: PixupApi, S: KeyValueStore> Clone for Enhancer<A, S> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            history: self.history.clone(),
            destination: self.destination.clone(),
        }
    }
}

impl<A: PixupApi, S: KeyValueStore> Enhancer<A, S> {
    pub fn new(api: Arc<A>, history: SharedHistory<S>, destination: Destination) -> Self {
        Self {
            api,
            history,
            destination,
        }
    }

    pub fn history(&self) -> &SharedHistory<S> {
        &self.history
    }

    /// Upload a staged local image, enhance it and record the pair.
    pub async fn enhance_file(
        &self,
        staged: StagedImage,
        events: &EventSender,
    ) -> crate::error::Result<EnhancementRecord> {
        log::info!("Enhancing local file {}", staged.file_name);
        let outcome = async {
            emit(events, PipelineEvent::Stage(PipelineStage::Uploading));
            emit(events, PipelineEvent::Progress(0));
            let original_url = upload_client::upload(
                self.api.as_ref(),
                staged.into_payload(),
                upload_client::ORIGINAL_PREFIX,
                &self.destination,
                Some(events),
            )
            .await?;
            log::info!("Original uploaded: {}", original_url);

            emit(events, PipelineEvent::Stage(PipelineStage::Enhancing));
            let enhanced_url =
                enhance_client::enhance(self.api.as_ref(), &original_url, &self.destination).await?;
            Ok::<_, AppError>(EnhancementRecord::new(original_url, enhanced_url))
        }
        .await;

        self.finish(outcome, events, |e| match e {
            AppError::UploadFailed | AppError::EnhanceFailed => e.to_string(),
            _ => FALLBACK_FAILURE_MESSAGE.to_string(),
        })
        .await
    }

    /// Enhance an image that is already reachable by URL. The URL is taken
    /// verbatim; a bad one only shows up as an enhancement failure.
    pub async fn enhance_url(
        &self,
        url: &str,
        events: &EventSender,
    ) -> crate::error::Result<EnhancementRecord> {
        log::info!("Enhancing image from URL {}", url);
        let outcome = async {
            emit(events, PipelineEvent::Stage(PipelineStage::Enhancing));
            let enhanced_url =
                enhance_client::enhance(self.api.as_ref(), url, &self.destination).await?;
            Ok::<_, AppError>(EnhancementRecord::new(url.to_string(), enhanced_url))
        }
        .await;

        self.finish(outcome, events, |_| URL_FAILURE_MESSAGE.to_string())
            .await
    }

    async fn finish<F>(
        &self,
        outcome: crate::error::Result<EnhancementRecord>,
        events: &EventSender,
        message_for: F,
    ) -> crate::error::Result<EnhancementRecord>
    where
        F: FnOnce(&AppError) -> String,
    {
        match outcome {
            Ok(record) => {
                {
                    let mut history = self.history.lock().await;
                    if let Err(e) = history.append(record.clone()) {
                        log::error!("Failed to persist history record {}: {}", record.id, e);
                    }
                }
                log::info!("Enhancement complete: {}", record.enhanced_url);
                emit(events, PipelineEvent::Stage(PipelineStage::Complete));
                emit(events, PipelineEvent::Success(record.clone()));
                Ok(record)
            }
            Err(e) => {
                let message = message_for(&e);
                log::error!("Enhancement failed: {} ({})", message, e);
                emit(events, PipelineEvent::Stage(PipelineStage::Failed));
                emit(events, PipelineEvent::Failure(message));
                Err(e)
            }
        }
    }
}

fn emit(events: &EventSender, event: PipelineEvent) {
    let _ = events.send(event);
}
