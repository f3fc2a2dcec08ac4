use uuid::Uuid;

use super::{WearError, discard_image};
use crate::application::ports::faculty_wear_repository::FacultyWearRepository;
use crate::application::ports::media_store::MediaStore;

pub struct DeleteWear<'a, R, M>
where
    R: FacultyWearRepository + ?Sized,
    M: MediaStore + ?Sized,
{
    pub repo: &'a R,
    pub media: &'a M,
}

impl<'a, R, M> DeleteWear<'a, R, M>
where
    R: FacultyWearRepository + ?Sized,
    M: MediaStore + ?Sized,
{
    pub async fn execute(&self, id: Uuid) -> Result<(), WearError> {
        let wear = self.repo.get_by_id(id).await?.ok_or(WearError::NotFound)?;
        discard_image(self.media, &wear.image_url).await;
        if !self.repo.delete(id).await? {
            return Err(WearError::DeleteFailed);
        }
        tracing::info!(wear_id = %id, "faculty_wear_deleted");
        Ok(())
    }
}
