//! File-backed key-value store
//!
//! Stands in for the browser's local storage: one JSON object maps string keys
//! to JSON values. Every write replaces the whole file through a temporary file
//! and a rename, so readers never see a half-written document.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the value stored under `key`, if any
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut document = self.read_document().await?;
        match document.remove(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Stores `value` under `key`, replacing whatever was there
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let mut document = self.read_document().await?;
        document.insert(key.to_string(), serde_json::to_value(value)?);
        self.write_document(&document).await
    }

    async fn read_document(&self) -> AppResult<Map<String, Value>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(Map::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_document(&self, document: &Map<String, Value>) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(document)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, bytes).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        tracing::debug!(path = %self.path.display(), keys = document.len(), "Local store written");
        Ok(())
    }
}
