//! Business logic layer.
//!
//! The upload and enhancement clients, the pipeline that chains them, and the
//! staging/download helpers around it. Called by the `commands` layer;
//! delegates HTTP to the `api` layer and persistence to the `storage` layer.

pub mod download;
pub mod enhance_client;
pub mod pipeline;
pub mod progress;
pub mod staging;
pub mod upload_client;
