use crate::config::Config;
use crate::storage::FileStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handler state. Nothing loaded from the store is cached here; each
/// request takes the lock and reads fresh documents.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<Mutex<FileStore>>,
}

impl AppState {
    pub fn new(config: Config, store: FileStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(Mutex::new(store)),
        }
    }
}
