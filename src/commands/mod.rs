//! CLI command handlers.
//!
//! Handlers parse their arguments, forward to the `services` and `storage`
//! layers and turn errors into user-facing strings. They hold no business
//! logic of their own.

use std::sync::Arc;

use crate::api::v1::PixupApiV1;
use crate::api::PixupApi;
use crate::config::Config;
use crate::services::pipeline::Enhancer;
use crate::storage::history::{HistoryStore, SharedHistory};
use crate::storage::{JsonFileStore, KeyValueStore};

pub mod download;
pub mod enhance;
pub mod history;

/// Everything a command needs, wired once at startup.
pub struct AppState<A: PixupApi = PixupApiV1, S: KeyValueStore = JsonFileStore> {
    pub api: Arc<A>,
    pub history: SharedHistory<S>,
    pub enhancer: Enhancer<A, S>,
}

impl AppState {
    pub fn new(config: &Config) -> crate::error::Result<Self> {
        let api = Arc::new(PixupApiV1::new(config)?);
        let store = JsonFileStore::open(config.store_path());
        log::debug!("History store at {}", store.path().display());
        Ok(Self::with_parts(api, HistoryStore::open(store), config))
    }
}

impl<A: PixupApi, S: KeyValueStore> AppState<A, S> {
    pub fn with_parts(api: Arc<A>, history: HistoryStore<S>, config: &Config) -> Self {
        let history = history.into_shared();
        let enhancer = Enhancer::new(api.clone(), history.clone(), config.destination());
        Self {
            api,
            history,
            enhancer,
        }
    }
}
