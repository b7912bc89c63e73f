use std::path::{Path, PathBuf};

use crate::api::PixupApi;
use crate::services::download;
use crate::storage::KeyValueStore;

use super::AppState;

/// Save the enhanced image of history record `id` into `dest_dir`.
pub async fn download_enhanced<A: PixupApi, S: KeyValueStore>(
    state: &AppState<A, S>,
    id: &str,
    dest_dir: &Path,
) -> Result<PathBuf, String> {
    // Clone out so the history lock is not held across the network call.
    let record = {
        let history = state.history.lock().await;
        history
            .get(id)
            .cloned()
            .ok_or_else(|| format!("No history record with id: {}", id))?
    };
    download::download(state.api.as_ref(), &record, dest_dir)
        .await
        .map_err(|e| e.to_string())
}
