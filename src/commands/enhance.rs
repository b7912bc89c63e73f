//! CLI handlers for the two enhancement entry points.
//!
//! Pipeline events are drained on a separate task that prints progress to
//! stderr; the failure message it sees becomes the command's error.

use crate::api::PixupApi;
use crate::models::events::{self, EventReceiver, PipelineEvent, PipelineStage};
use crate::models::history::EnhancementRecord;
use crate::services::staging;
use crate::storage::KeyValueStore;

use super::AppState;

pub async fn enhance_file<A: PixupApi, S: KeyValueStore>(
    state: &AppState<A, S>,
    path: &str,
) -> Result<EnhancementRecord, String> {
    let staged = staging::stage_file(path).await.map_err(|e| e.to_string())?;
    let (tx, rx) = events::channel();
    let printer = tokio::spawn(print_events(rx));
    let result = state.enhancer.enhance_file(staged, &tx).await;
    drop(tx);
    let failure = printer.await.ok().flatten();
    result.map_err(|e| failure.unwrap_or_else(|| e.to_string()))
}

pub async fn enhance_url<A: PixupApi, S: KeyValueStore>(
    state: &AppState<A, S>,
    url: &str,
) -> Result<EnhancementRecord, String> {
    let (tx, rx) = events::channel();
    let printer = tokio::spawn(print_events(rx));
    let result = state.enhancer.enhance_url(url, &tx).await;
    drop(tx);
    let failure = printer.await.ok().flatten();
    result.map_err(|e| failure.unwrap_or_else(|| e.to_string()))
}

/// Print progress lines until the channel closes; return the failure message, if any.
async fn print_events(mut rx: EventReceiver) -> Option<String> {
    let mut failure = None;
    while let Some(event) = rx.recv().await {
        if let PipelineEvent::Failure(message) = &event {
            failure = Some(message.clone());
        } else if let Some(line) = render_event(&event) {
            eprintln!("{}", line);
        }
    }
    failure
}

/// Progress line for an event; `None` for events not shown while running.
pub fn render_event(event: &PipelineEvent) -> Option<String> {
    match event {
        PipelineEvent::Progress(pct) => Some(format!("Uploading: {}%", pct)),
        PipelineEvent::Stage(PipelineStage::Enhancing) => Some("Enhancing...".to_string()),
        PipelineEvent::Stage(_) => None,
        PipelineEvent::Success(_) => Some("Image enhanced successfully!".to_string()),
        PipelineEvent::Failure(message) => Some(message.clone()),
    }
}
