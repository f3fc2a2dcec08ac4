use async_trait::async_trait;

use crate::domain::faculty_wear::ImageUpload;

#[derive(Debug, Clone)]
pub struct StoredMedia {
    pub url: String,
    pub public_id: String,
    pub size: i64,
}

/// Hosted storage for catalogue images.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload_image(&self, image: &ImageUpload, folder: &str)
    -> anyhow::Result<StoredMedia>;

    /// Removes the media behind a URL previously returned by `upload_image`.
    /// Returns false when the provider did not confirm the deletion.
    async fn delete_by_url(&self, url: &str) -> anyhow::Result<bool>;
}
