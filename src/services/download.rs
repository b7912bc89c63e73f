//! Saving an enhanced image from history to disk.

use std::path::{Path, PathBuf};

use crate::api::PixupApi;
use crate::error::AppError;
use crate::models::history::EnhancementRecord;
use crate::models::image::extension_for;

pub fn file_name_for(record: &EnhancementRecord, content_type: &str) -> String {
    format!("pixup-enhanced-{}.{}", record.id, extension_for(content_type))
}

/// Fetch `record`'s enhanced image and write it into `dest_dir`.
pub async fn download<A: PixupApi>(
    api: &A,
    record: &EnhancementRecord,
    dest_dir: &Path,
) -> crate::error::Result<PathBuf> {
    let payload = api.fetch_image(&record.enhanced_url).await?;
    tokio::fs::create_dir_all(dest_dir)
        .await
        .map_err(|e| AppError::Io(format!("{}: {}", dest_dir.display(), e)))?;

    let path = dest_dir.join(file_name_for(record, &payload.content_type));
    tokio::fs::write(&path, &payload.data)
        .await
        .map_err(|e| AppError::Io(format!("{}: {}", path.display(), e)))?;
    log::info!("Saved {} bytes to {}", payload.len(), path.display());
    Ok(path)
}
