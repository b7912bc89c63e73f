pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use config::Config;
pub use error::{AppError, Result};
pub use models::events::{PipelineEvent, PipelineStage};
pub use models::history::EnhancementRecord;
pub use services::pipeline::Enhancer;
