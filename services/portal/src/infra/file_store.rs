use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::domain::repository::SlotStore;
use crate::error::StorageError;

/// One file per slot under `dir`. Writes go to a temp file that is renamed
/// over the slot, so a slot is always either the old or the new value.
pub struct FileSlotStore {
    dir: PathBuf,
    quota: usize,
}

impl FileSlotStore {
    pub fn new(dir: impl Into<PathBuf>, quota: usize) -> Self {
        Self {
            dir: dir.into(),
            quota,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.slot"))
    }
}

impl SlotStore for FileSlotStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if value.len() > self.quota {
            return Err(StorageError::QuotaExceeded {
                needed: value.len(),
                quota: self.quota,
            });
        }

        fs::create_dir_all(&self.dir).await?;
        let tmp = self.dir.join(format!(".{key}.tmp"));
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, self.slot_path(key)).await?;
        debug!(slot = key, bytes = value.len(), "slot written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.slot_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
