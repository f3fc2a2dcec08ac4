use super::{WearError, upload_image};
use crate::application::ports::faculty_wear_repository::FacultyWearRepository;
use crate::application::ports::media_store::MediaStore;
use crate::domain::faculty_wear::{self, FacultyWear, ImageUpload, WearForm};

pub struct CreateWear<'a, R, M>
where
    R: FacultyWearRepository + ?Sized,
    M: MediaStore + ?Sized,
{
    pub repo: &'a R,
    pub media: &'a M,
    pub folder: &'a str,
}

impl<'a, R, M> CreateWear<'a, R, M>
where
    R: FacultyWearRepository + ?Sized,
    M: MediaStore + ?Sized,
{
    pub async fn execute(
        &self,
        form: &WearForm,
        image: Option<&ImageUpload>,
    ) -> Result<FacultyWear, WearError> {
        let draft = faculty_wear::validate(form).map_err(WearError::Validation)?;
        let image = image.ok_or(WearError::ImageRequired)?;
        let image_url = upload_image(self.media, image, self.folder).await?;

        let wear = self.repo.insert(&draft, &image_url).await.map_err(|err| {
            tracing::error!(error = ?err, image_url = %image_url, "insert_faculty_wear_failed");
            err
        })?;
        tracing::info!(wear_id = %wear.id, "faculty_wear_created");
        Ok(wear)
    }
}
