//! File-backed local storage
//!
//! One file per key inside a device directory.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::fs;

use crate::local_storage::{LocalStorage, LocalStorageError, validate_key};

#[derive(Debug, Clone)]
pub struct FileLocalStorage {
    root: PathBuf,
}

impl FileLocalStorage {
    /// Use `root` as the device directory, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, LocalStorageError> {
        let root = root.into();

        fs::create_dir_all(&root).await?;

        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, LocalStorageError> {
        validate_key(key)?;

        Ok(self.root.join(key))
    }
}

#[async_trait]
impl LocalStorage for FileLocalStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, LocalStorageError> {
        match fs::read_to_string(self.path_for(key)?).await {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), LocalStorageError> {
        fs::write(self.path_for(key)?, value).await?;

        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), LocalStorageError> {
        match fs::remove_file(self.path_for(key)?).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
