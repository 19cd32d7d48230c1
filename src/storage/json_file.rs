use crate::model::{EnrichedListing, StorageError};
use std::path::{Path, PathBuf};

/// Persists the enriched dataset as a pretty-printed JSON array.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the file with the given listings (2-space indentation).
    pub async fn save(&self, listings: &[EnrichedListing]) -> Result<(), StorageError> {
        let body = serde_json::to_string_pretty(listings)?;
        tokio::fs::write(&self.path, body).await?;
        Ok(())
    }
}
