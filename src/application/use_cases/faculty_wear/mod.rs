pub mod create_wear;
pub mod delete_wear;
pub mod get_wear;
pub mod list_wears;
pub mod update_wear;

use crate::application::ports::media_store::MediaStore;
use crate::domain::faculty_wear::{self, ImageUpload};

#[derive(Debug, thiserror::Error)]
pub enum WearError {
    #[error("Validation failed")]
    Validation(Vec<String>),
    #[error("Image is required")]
    ImageRequired,
    #[error("Failed to upload image")]
    UploadFailed,
    #[error("Wear not found")]
    NotFound,
    #[error("Failed to delete wear")]
    DeleteFailed,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Uploads a catalogue image and returns its public URL.
/// Files with an extension outside the allow-list never reach the store.
async fn upload_image<M: MediaStore + ?Sized>(
    media: &M,
    image: &ImageUpload,
    folder: &str,
) -> Result<String, WearError> {
    if !faculty_wear::allowed_image(&image.filename) {
        tracing::info!(filename = %image.filename, "image_extension_rejected");
        return Err(WearError::UploadFailed);
    }
    match media.upload_image(image, folder).await {
        Ok(stored) => {
            tracing::debug!(public_id = %stored.public_id, size = stored.size, "image_uploaded");
            Ok(stored.url)
        }
        Err(err) => {
            tracing::error!(error = ?err, filename = %image.filename, "image_upload_failed");
            Err(WearError::UploadFailed)
        }
    }
}

/// Best-effort removal of a stored image; failures are only logged.
async fn discard_image<M: MediaStore + ?Sized>(media: &M, url: &str) {
    if url.is_empty() {
        return;
    }
    match media.delete_by_url(url).await {
        Ok(true) => {}
        Ok(false) => tracing::warn!(url = %url, "image_delete_not_confirmed"),
        Err(err) => tracing::warn!(url = %url, error = ?err, "image_delete_failed"),
    }
}
