use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Persists `contents` under `file_name` and returns the stored name.
    async fn save_file(&self, file_name: &str, contents: Vec<u8>) -> Result<String, StorageError>;

    /// Removes a stored file. Missing files are ignored.
    async fn delete_file(&self, file_name: &str) -> Result<(), StorageError>;
}

/// Prefixes the client's file name with 20 random hex characters.
pub fn unique_file_name(original: &str) -> String {
    let base = Path::new(original)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("avatar");

    let bytes: [u8; 10] = rand::thread_rng().gen();
    let hash: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();

    format!("{}-{}", hash, base.replace(' ', "_"))
}

fn checked_name(file_name: &str) -> Result<&str, StorageError> {
    match Path::new(file_name).file_name().and_then(|name| name.to_str()) {
        Some(name) if name == file_name => Ok(name),
        _ => Err(StorageError::InvalidName(file_name.to_string())),
    }
}

/// Stores files in a local folder that is also served at `/files`.
pub struct DiskStorageProvider {
    folder: PathBuf,
}

impl DiskStorageProvider {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self { folder: folder.into() }
    }
}

#[async_trait]
impl StorageProvider for DiskStorageProvider {
    async fn save_file(&self, file_name: &str, contents: Vec<u8>) -> Result<String, StorageError> {
        let name = checked_name(file_name)?;

        tokio::fs::create_dir_all(&self.folder).await?;
        tokio::fs::write(self.folder.join(name), contents).await?;

        info!("Stored file {}", name);
        Ok(name.to_string())
    }

    async fn delete_file(&self, file_name: &str) -> Result<(), StorageError> {
        let name = checked_name(file_name)?;

        match tokio::fs::remove_file(self.folder.join(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("File {} already gone", name);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Default)]
pub struct InMemoryStorageProvider {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryStorageProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, file_name: &str) -> bool {
        self.files.read().await.contains_key(file_name)
    }
}

#[async_trait]
impl StorageProvider for InMemoryStorageProvider {
    async fn save_file(&self, file_name: &str, contents: Vec<u8>) -> Result<String, StorageError> {
        self.files.write().await.insert(file_name.to_string(), contents);
        Ok(file_name.to_string())
    }

    async fn delete_file(&self, file_name: &str) -> Result<(), StorageError> {
        self.files.write().await.remove(file_name);
        Ok(())
    }
}
