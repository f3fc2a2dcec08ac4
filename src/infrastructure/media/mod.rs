mod cloudinary;
mod filesystem;
mod s3;

pub use cloudinary::*;
pub use filesystem::*;
pub use s3::*;

use std::sync::Arc;

use crate::application::ports::media_store::MediaStore;
use crate::bootstrap::config::{Config, MediaBackend};
use crate::domain::faculty_wear::ImageUpload;

pub async fn build_media_store(cfg: &Config) -> anyhow::Result<Arc<dyn MediaStore>> {
    let store: Arc<dyn MediaStore> = match cfg.media_backend {
        MediaBackend::Cloudinary => Arc::new(CloudinaryMediaStore::from_config(cfg)?),
        MediaBackend::S3 => Arc::new(S3MediaStore::new(cfg).await?),
        MediaBackend::Filesystem => Arc::new(FsMediaStore::new(
            &cfg.storage_root,
            cfg.public_base_url.clone(),
        )),
    };
    Ok(store)
}

/// Unique object name for an upload, keeping the original extension.
pub(crate) fn object_name(image: &ImageUpload) -> String {
    match image.extension() {
        Some(ext) => format!("{}.{}", uuid::Uuid::new_v4(), ext),
        None => uuid::Uuid::new_v4().to_string(),
    }
}

pub(crate) fn content_type_of(image: &ImageUpload) -> String {
    image
        .content_type
        .clone()
        .filter(|ct| !ct.is_empty())
        .unwrap_or_else(|| {
            mime_guess::from_path(&image.filename)
                .first_or_octet_stream()
                .essence_str()
                .to_string()
        })
}
