//! Persistent key-value storage for settings objects.
//!
//! [`SettingsStore`] is the narrow interface every consumer goes through. The
//! extension ships [`TomlFileStore`], which keeps one value per TOML file in
//! the user's configuration directory, and [`MemoryStore`] for contexts with
//! no usable disk.

use std::future::Future;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use directories::ProjectDirs;
use serde::{Serialize, de::DeserializeOwned};
use tokio::{
    fs::{OpenOptions, create_dir_all, read_to_string},
    io::AsyncWriteExt,
};

/// Errors that can occur while loading or saving a settings value.
///
/// The `Display` text of each variant is what the options form shows inline
/// when a save fails, so keep it readable.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to determine the user's configuration directory. This usually
    /// occurs when required environment variables are missing (e.g. `$HOME`
    /// on Unix or `%APPDATA%` on Windows).
    #[error("failed to obtain user's directories")]
    DirectoriesNotFound,
    /// An I/O error occurred while reading or writing the settings file.
    #[error("failed to access settings: {0}")]
    Io(#[from] std::io::Error),
    /// The settings file contains invalid TOML or does not match the
    /// expected structure.
    #[error("failed to deserialize settings: {0}")]
    Deserialize(#[from] toml::de::Error),
    /// Failed to serialize the settings value to TOML.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A store implementation refused the operation for its own reasons.
    #[error("{0}")]
    Rejected(String),
}

/// Asynchronous storage holding a single settings value of type `T`.
///
/// There is no transactional guarantee across concurrent writers: the last
/// `save` wins.
pub trait SettingsStore<T> {
    /// Reads the stored value, or `None` if nothing was saved yet.
    fn load(&self) -> impl Future<Output = Result<Option<T>, StoreError>> + Send;

    /// Replaces the stored value wholesale.
    fn save(&self, value: &T) -> impl Future<Output = Result<(), StoreError>> + Send;
}

impl<T, S: SettingsStore<T>> SettingsStore<T> for Arc<S> {
    fn load(&self) -> impl Future<Output = Result<Option<T>, StoreError>> + Send {
        (**self).load()
    }

    fn save(&self, value: &T) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).save(value)
    }
}

/// Resolves the per-user configuration directory of the extension.
pub fn config_dir() -> Result<PathBuf, StoreError> {
    match ProjectDirs::from("dev", "torrent2box", "torrent2box") {
        Some(dirs) => Ok(dirs.config_dir().to_path_buf()),
        None => Err(StoreError::DirectoriesNotFound),
    }
}

/// Stores a value as pretty-printed TOML in a single file.
#[derive(Debug)]
pub struct TomlFileStore<T> {
    path: PathBuf,
    _value: PhantomData<fn() -> T>,
}

impl<T> TomlFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _value: PhantomData,
        }
    }

    /// Creates a store for `file_name` inside the user's configuration
    /// directory (see [`config_dir`]).
    pub fn in_config_dir(file_name: &str) -> Result<Self, StoreError> {
        Ok(Self::new(config_dir()?.join(file_name)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> SettingsStore<T> for TomlFileStore<T>
where
    T: Serialize + DeserializeOwned + Sync,
{
    async fn load(&self) -> Result<Option<T>, StoreError> {
        if !self.path.exists() {
            log::info!("No settings stored at {:?} yet", self.path);
            return Ok(None);
        }

        log::info!("Loading settings from {:?}", self.path);
        let contents = read_to_string(&self.path).await?;
        let value: T = toml::from_str(&contents)?;
        Ok(Some(value))
    }

    async fn save(&self, value: &T) -> Result<(), StoreError> {
        let contents = toml::to_string_pretty(value)?;
        if let Some(parent) = self.path.parent() {
            create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .await?;
        file.write_all(contents.as_bytes()).await?;
        file.sync_all().await?;

        log::info!("Saved settings to {:?}", self.path);
        Ok(())
    }
}

/// Keeps the value in process memory. Nothing survives a restart.
#[derive(Debug)]
pub struct MemoryStore<T> {
    value: Mutex<Option<T>>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            value: Mutex::new(None),
        }
    }

    pub fn with_value(value: T) -> Self {
        Self {
            value: Mutex::new(Some(value)),
        }
    }
}

impl<T> SettingsStore<T> for MemoryStore<T>
where
    T: Clone + Send + Sync,
{
    async fn load(&self) -> Result<Option<T>, StoreError> {
        let value = self
            .value
            .lock()
            .map_err(|_| StoreError::Rejected("memory store lock poisoned".into()))?;
        Ok(value.clone())
    }

    async fn save(&self, value: &T) -> Result<(), StoreError> {
        let mut stored = self
            .value
            .lock()
            .map_err(|_| StoreError::Rejected("memory store lock poisoned".into()))?;
        *stored = Some(value.clone());
        Ok(())
    }
}
