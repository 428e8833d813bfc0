//! Filesystem-backed store: one directory per bucket under a fixed root.
//! This is the `local` deployment backend.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::{fs, io};

use crate::object_store::{ObjectStore, StoreError};

#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, bucket: &str, key: &str) -> PathBuf {
        self.root.join(bucket).join(key)
    }

    fn map_err(err: io::Error, bucket: &str, key: &str) -> StoreError {
        match err.kind() {
            ErrorKind::NotFound => StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            },
            ErrorKind::PermissionDenied => StoreError::Unauthorized {
                bucket: bucket.to_string(),
                key: key.to_string(),
            },
            _ => StoreError::Io(err),
        }
    }
}

impl ObjectStore for FsStore {
    fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        fs::read(self.object_path(bucket, key)).map_err(|e| Self::map_err(e, bucket, key))
    }

    fn head(&self, bucket: &str, key: &str) -> Result<bool, StoreError> {
        match fs::metadata(self.object_path(bucket, key)) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Self::map_err(e, bucket, key)),
        }
    }

    fn put(&self, bucket: &str, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.object_path(bucket, key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Self::map_err(e, bucket, key))?;
        }
        fs::write(&path, bytes).map_err(|e| Self::map_err(e, bucket, key))
    }
}
