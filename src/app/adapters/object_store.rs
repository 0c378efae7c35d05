//! Object store adapter
//!
//! The pipeline reads and writes its zones through this narrow interface.
//! Production deployments sit behind a blob store; here a filesystem-backed
//! implementation rooted at a bucket directory stands in for it, with keys
//! like `raw-zone/2025-01-15.csv` mapping to paths under the root.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Narrow object-store interface: opaque byte streams keyed by string
pub trait ObjectStore {
    /// Fetch an object's bytes
    fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Write an object's bytes, replacing any existing object
    fn put(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Whether an object exists
    fn exists(&self, key: &str) -> bool;
}

/// Filesystem-backed object store rooted at a bucket directory
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Create a store over a bucket directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The bucket root
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl ObjectStore for FsObjectStore {
    fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.path_for(key);
        debug!("Reading object {}", path.display());

        match std::fs::read(&path) {
            Ok(bytes) => {
                info!("Read {} bytes from {}", bytes.len(), key);
                Ok(bytes)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::object_missing(key))
            }
            Err(e) => Err(Error::object_store(key, "Read failed", e)),
        }
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(key);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::object_store(key, "Cannot create zone directory", e))?;
        }

        std::fs::write(&path, bytes)
            .map_err(|e| Error::object_store(key, "Write failed", e))?;

        info!("Wrote {} bytes to {}", bytes.len(), key);
        Ok(())
    }

    fn exists(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }
}
