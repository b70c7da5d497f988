///! File-backed session store
///!
///! Each session entry lives in its own file named after the key, so a write
///! to one entry never touches the other.

use hrms_common::{SessionStore, StorageError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

pub struct FileStore {
    /// `Err` holds the reason no session directory could be located
    dir: Result<PathBuf, String>,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: Ok(dir.into()) }
    }

    /// A store with nowhere to keep entries. Every operation reports
    /// [`StorageError::Unavailable`], so a policy built on it starts logged out.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self { dir: Err(reason.into()) }
    }

    /// Store rooted at a resolved session directory, or an unavailable one
    /// when resolution failed
    pub fn open(dir: anyhow::Result<PathBuf>) -> Self {
        match dir {
            Ok(dir) => Self::new(dir),
            Err(e) => {
                let reason = format!("{:#}", e);
                warn!(error = %reason, "no session directory, continuing logged out");
                Self::unavailable(reason)
            }
        }
    }

    fn dir(&self) -> Result<&Path, StorageError> {
        self.dir
            .as_deref()
            .map_err(|reason| StorageError::Unavailable(reason.clone()))
    }

    fn path(&self, key: &str) -> Result<PathBuf, StorageError> {
        Ok(self.dir()?.join(key))
    }
}

fn access_error(key: &str, err: std::io::Error) -> StorageError {
    StorageError::Access {
        key: key.to_string(),
        message: err.to_string(),
    }
}

impl SessionStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path(key)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(access_error(key, e)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let dir = self.dir()?;
        std::fs::create_dir_all(dir).map_err(|e| StorageError::Unavailable(format!("{}: {}", dir.display(), e)))?;

        // entries are replaced by rename, never written in place
        let target = dir.join(key);
        let staging = dir.join(format!(".{}.tmp", key));
        std::fs::write(&staging, value).map_err(|e| access_error(key, e))?;
        restrict_permissions(&staging).map_err(|e| access_error(key, e))?;
        std::fs::rename(&staging, &target).map_err(|e| access_error(key, e))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(access_error(key, e)),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
