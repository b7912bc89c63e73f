use crate::api::PixupApi;
use crate::models::history::EnhancementRecord;
use crate::storage::KeyValueStore;

use super::AppState;

pub async fn list<A: PixupApi, S: KeyValueStore>(state: &AppState<A, S>) -> String {
    let history = state.history.lock().await;
    render_list(history.records())
}

/// Before/after view of one record.
pub async fn show<A: PixupApi, S: KeyValueStore>(
    state: &AppState<A, S>,
    id: &str,
) -> Result<String, String> {
    let history = state.history.lock().await;
    history
        .get(id)
        .map(render_record)
        .ok_or_else(|| no_such_record(id))
}

pub async fn delete<A: PixupApi, S: KeyValueStore>(
    state: &AppState<A, S>,
    id: &str,
) -> Result<(), String> {
    let mut history = state.history.lock().await;
    match history.remove(id) {
        Ok(true) => Ok(()),
        Ok(false) => Err(no_such_record(id)),
        Err(e) => Err(e.to_string()),
    }
}

/// Clear all history. Returns how many records were removed.
pub async fn clear<A: PixupApi, S: KeyValueStore>(state: &AppState<A, S>) -> Result<usize, String> {
    let mut history = state.history.lock().await;
    let count = history.len();
    history.clear().map_err(|e| e.to_string())?;
    Ok(count)
}

fn no_such_record(id: &str) -> String {
    format!("No history record with id: {}", id)
}

pub fn render_list(records: &[EnhancementRecord]) -> String {
    if records.is_empty() {
        return "No enhanced images yet.".to_string();
    }
    records
        .iter()
        .map(|r| format!("{}  {}  {}", r.id, r.display_timestamp(), r.enhanced_url))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_record(record: &EnhancementRecord) -> String {
    format!(
        "id:       {}\ncreated:  {}\noriginal: {}\nenhanced: {}",
        record.id,
        record.display_timestamp(),
        record.original_url,
        record.enhanced_url
    )
}
