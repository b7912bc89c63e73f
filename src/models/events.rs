//! Notifications emitted by the enhancement pipeline.

use tokio::sync::mpsc;

use super::history::EnhancementRecord;

/// Where a single pipeline invocation currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Uploading,
    Enhancing,
    Complete,
    Failed,
}

impl PipelineStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineStage::Complete | PipelineStage::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Uploading => "uploading",
            PipelineStage::Enhancing => "enhancing",
            PipelineStage::Complete => "complete",
            PipelineStage::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// Upload percentage, 0..=100.
    Progress(u8),
    Stage(PipelineStage),
    Success(EnhancementRecord),
    Failure(String),
}

pub type EventSender = mpsc::UnboundedSender<PipelineEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<PipelineEvent>;

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
