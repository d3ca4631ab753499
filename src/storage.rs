use crate::errors::AppError;
use crate::models::{ActivityDefinition, FinishedActivity};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

const CATALOG_FILE: &str = "activities.json";
const HISTORY_FILE: &str = "activities-history.json";

pub fn default_catalog() -> Vec<ActivityDefinition> {
    vec![
        ActivityDefinition::new("stretching", vec![12, 14, 16, 18]),
        ActivityDefinition::new("fitness", vec![1, 3, 5, 7]),
    ]
}

/// Catalog and history kept as two whole JSON documents in one directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    catalog_path: PathBuf,
    history_path: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            catalog_path: data_dir.join(CATALOG_FILE),
            history_path: data_dir.join(HISTORY_FILE),
        }
    }

    /// Creates the data directory and seeds missing documents.
    pub async fn init(data_dir: &Path) -> Result<Self, AppError> {
        fs::create_dir_all(data_dir).await?;
        let store = Self::new(data_dir);

        if !fs::try_exists(&store.catalog_path).await? {
            info!(path = %store.catalog_path.display(), "writing default activity catalog");
            store.save_catalog(&default_catalog()).await?;
        }
        if !fs::try_exists(&store.history_path).await? {
            info!(path = %store.history_path.display(), "creating empty history");
            store.save_history(&[]).await?;
        }

        Ok(store)
    }

    pub async fn load_catalog(&self) -> Result<Vec<ActivityDefinition>, AppError> {
        read_document(&self.catalog_path).await
    }

    pub async fn save_catalog(&self, catalog: &[ActivityDefinition]) -> Result<(), AppError> {
        write_document(&self.catalog_path, catalog).await
    }

    pub async fn load_history(&self) -> Result<Vec<FinishedActivity>, AppError> {
        read_document(&self.history_path).await
    }

    pub async fn save_history(&self, history: &[FinishedActivity]) -> Result<(), AppError> {
        write_document(&self.history_path, history).await
    }

    pub async fn append_history(&self, entry: FinishedActivity) -> Result<(), AppError> {
        let mut history = self.load_history().await?;
        history.push(entry);
        self.save_history(&history).await
    }
}

async fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let bytes = fs::read(path).await.map_err(|err| {
        AppError::Persistence(format!("failed to read {}: {err}", path.display()))
    })?;
    serde_json::from_slice(&bytes).map_err(|err| {
        AppError::Persistence(format!("failed to parse {}: {err}", path.display()))
    })
}

async fn write_document<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(value)?;
    fs::write(path, payload).await.map_err(|err| {
        AppError::Persistence(format!("failed to write {}: {err}", path.display()))
    })?;
    debug!(path = %path.display(), "document saved");
    Ok(())
}
