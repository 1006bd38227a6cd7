//! Object storage seam used when records owning images are deleted.

use thiserror::Error;

/// Errors reported by an [`ImageStore`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Hosted object storage holding machine and content images.
pub trait ImageStore {
    /// URL prefix of objects served by this store.
    fn url_prefix(&self) -> &str;

    /// Delete the object (or folder) at `location`, given either as a full
    /// URL or as a path inside the bucket such as `machines/{id}`.
    fn delete_object(&self, location: &str) -> Result<(), StorageError>;

    /// Whether `url` points into this store. Foreign URLs are never deleted.
    fn is_managed(&self, url: &str) -> bool {
        url.starts_with(self.url_prefix())
    }
}
