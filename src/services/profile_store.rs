use crate::models::PlayerProfile;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;

/// Errors that can occur while reading or writing the viewer profile
#[derive(Debug, Error)]
pub enum ProfileStoreError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed profile document: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Profile store lock poisoned")]
    Poisoned,
}

/// Source of the browsing user's own profile
///
/// The matcher never reads this itself; handlers load the viewer and pass it in.
pub trait ProfileStore: Send + Sync {
    /// Stored profile, `None` when nothing has been saved yet
    fn load(&self) -> Result<Option<PlayerProfile>, ProfileStoreError>;

    fn save(&self, profile: &PlayerProfile) -> Result<(), ProfileStoreError>;

    /// Forget the stored profile; clearing an empty store is not an error
    fn clear(&self) -> Result<(), ProfileStoreError>;

    /// Stored profile, or an all-empty one when absent or unreadable
    fn load_or_empty(&self) -> PlayerProfile {
        match self.load() {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                tracing::debug!("No viewer profile stored, using an empty one");
                PlayerProfile::default()
            }
            Err(e) => {
                tracing::warn!("Failed to load viewer profile, using an empty one: {}", e);
                PlayerProfile::default()
            }
        }
    }
}

/// Viewer profile kept as a single JSON document on disk
pub struct JsonFileProfileStore {
    path: PathBuf,
}

impl JsonFileProfileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStore for JsonFileProfileStore {
    fn load(&self) -> Result<Option<PlayerProfile>, ProfileStoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, profile: &PlayerProfile) -> Result<(), ProfileStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(profile)?;
        std::fs::write(&self.path, json)?;

        tracing::debug!("Saved viewer profile to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), ProfileStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("Removed viewer profile at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process profile store
#[derive(Default)]
pub struct MemoryProfileStore {
    profile: RwLock<Option<PlayerProfile>>,
}

impl MemoryProfileStore {
    pub fn new(profile: Option<PlayerProfile>) -> Self {
        Self {
            profile: RwLock::new(profile),
        }
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load(&self) -> Result<Option<PlayerProfile>, ProfileStoreError> {
        let guard = self.profile.read().map_err(|_| ProfileStoreError::Poisoned)?;
        Ok(guard.clone())
    }

    fn save(&self, profile: &PlayerProfile) -> Result<(), ProfileStoreError> {
        let mut guard = self.profile.write().map_err(|_| ProfileStoreError::Poisoned)?;
        *guard = Some(profile.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ProfileStoreError> {
        let mut guard = self.profile.write().map_err(|_| ProfileStoreError::Poisoned)?;
        *guard = None;
        Ok(())
    }
}
