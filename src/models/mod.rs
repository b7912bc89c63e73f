//! Data models for pixup.
//!
//! Shared definitions used across layers: the persisted history record, image
//! payloads and the notifications the pipeline emits.

pub mod events;
pub mod history;
pub mod image;
