//! File store port trait
//!
//! Binary uploads (profile and post images) go to a content-addressed store.

use async_trait::async_trait;

use crate::error::UploadError;

/// A file received from the client
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait FileStore: Send + Sync {
    /// Pin a file and return its content-addressed reference
    async fn pin_file(&self, upload: &ImageUpload) -> Result<String, UploadError>;
}
