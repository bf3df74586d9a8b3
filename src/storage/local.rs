//! Local filesystem storage implementation.
//!
//! Every table is a pretty-printed JSON array under
//! `{root}/{year}/{team}/`. Writes go to a temp file first and are renamed
//! into place.
//!
//! ## Features
//!
//! - **Atomic single writes**: readers never see a half-written table
//! - **Grouped writes**: `write_all` stages every table before renaming any
//!   and restores earlier tables if a later rename fails

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::{Store, Table, TableKey};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root_dir: PathBuf,
}

impl LocalStore {
    /// Create a new LocalStore rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a table.
    fn path(&self, key: &TableKey) -> PathBuf {
        self.root_dir.join(key.relative_path())
    }

    /// Sibling path used while a table is being written.
    fn staging_path(path: &Path) -> PathBuf {
        let mut name = OsString::from(path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes to the staging file next to `path`.
    async fn stage(path: &Path, bytes: &[u8]) -> Result<PathBuf> {
        Self::ensure_dir(path).await?;

        let tmp = Self::staging_path(path);
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        Ok(tmp)
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(path: &Path) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Put a table file back the way it was before this write.
    async fn restore(path: &Path, previous: Option<Vec<u8>>) {
        let outcome = match previous {
            Some(bytes) => tokio::fs::write(path, bytes).await,
            None => tokio::fs::remove_file(path).await,
        };
        if let Err(e) = outcome {
            log::error!("Failed to restore {}: {}", path.display(), e);
        }
    }

    async fn discard(staged: &[PathBuf]) {
        for tmp in staged {
            let _ = tokio::fs::remove_file(tmp).await;
        }
    }
}

#[async_trait]
impl Store for LocalStore {
    async fn exists(&self, key: &TableKey) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.path(key)).await?)
    }

    async fn read(&self, key: &TableKey) -> Result<Option<Table>> {
        match Self::read_bytes(&self.path(key)).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn write(&self, key: &TableKey, table: &Table) -> Result<()> {
        let path = self.path(key);
        let bytes = serde_json::to_vec_pretty(table)?;
        let tmp = Self::stage(&path, &bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        log::debug!("Wrote {} rows to {}", table.len(), key);
        Ok(())
    }

    async fn write_all(&self, tables: &[(TableKey, Table)]) -> Result<()> {
        // Stage everything first; nothing visible changes until all bytes are on disk.
        let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(tables.len());
        for (key, table) in tables {
            let path = self.path(key);
            let staged_file = match serde_json::to_vec_pretty(table) {
                Ok(bytes) => Self::stage(&path, &bytes).await,
                Err(e) => Err(AppError::from(e)),
            };
            match staged_file {
                Ok(tmp) => staged.push((path, tmp)),
                Err(e) => {
                    let temps: Vec<PathBuf> = staged.into_iter().map(|(_, tmp)| tmp).collect();
                    Self::discard(&temps).await;
                    log::error!("Aborted grouped write at {}: {}", key, e);
                    return Err(e);
                }
            }
        }

        let mut committed: Vec<(PathBuf, Option<Vec<u8>>)> = Vec::with_capacity(staged.len());
        for (i, (path, tmp)) in staged.iter().enumerate() {
            let outcome = match Self::read_bytes(path).await {
                Ok(previous) => tokio::fs::rename(tmp, path)
                    .await
                    .map(|_| previous)
                    .map_err(AppError::from),
                Err(e) => Err(e),
            };

            match outcome {
                Ok(previous) => committed.push((path.clone(), previous)),
                Err(e) => {
                    log::error!(
                        "Grouped write failed at {}; rolling back {} tables",
                        path.display(),
                        committed.len()
                    );
                    for (done, previous) in committed.into_iter().rev() {
                        Self::restore(&done, previous).await;
                    }
                    let rest: Vec<PathBuf> =
                        staged[i..].iter().map(|(_, tmp)| tmp.clone()).collect();
                    Self::discard(&rest).await;
                    return Err(e);
                }
            }
        }

        log::debug!("Wrote {} tables together", tables.len());
        Ok(())
    }
}
