//! Upload progress reporting.
//!
//! Byte counts come in from the request body as it is streamed out; the
//! reporter turns them into whole percentages and emits a `Progress` event
//! only when the percentage changes.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

use crate::models::events::{EventSender, PipelineEvent};

/// Sentinel for "nothing emitted yet".
const NOT_EMITTED: u8 = u8::MAX;

#[derive(Debug)]
pub struct ProgressReporter {
    total: u64,
    sent: AtomicU64,
    last_emitted: AtomicU8,
    events: EventSender,
}

impl ProgressReporter {
    pub fn new(total: u64, events: EventSender) -> Self {
        Self {
            total,
            sent: AtomicU64::new(0),
            last_emitted: AtomicU8::new(NOT_EMITTED),
            events,
        }
    }

    /// Record `bytes` more as transmitted.
    pub fn advance(&self, bytes: u64) {
        let sent = self.sent.fetch_add(bytes, Ordering::Relaxed) + bytes;
        let pct = percent(sent, self.total);
        let prev = self.last_emitted.swap(pct, Ordering::Relaxed);
        if prev != pct {
            let _ = self.events.send(PipelineEvent::Progress(pct));
        }
    }

    pub fn bytes_sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }
}

/// round(sent * 100 / total), clamped to 100. An empty body counts as done.
pub fn percent(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = (sent as f64 * 100.0 / total as f64).round();
    pct.clamp(0.0, 100.0) as u8
}
