use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("no blob at {0}")]
    NotFound(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Blob storage seam for images (posters, avatars, cinema photos).
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Uploads bytes at `path` and returns the public URL.
    async fn upload(&self, bytes: &[u8], path: &str) -> Result<String, BlobError>;

    async fn delete(&self, url: &str) -> Result<(), BlobError>;
}
