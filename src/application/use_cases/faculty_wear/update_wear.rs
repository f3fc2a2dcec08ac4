use uuid::Uuid;

use super::{WearError, discard_image, upload_image};
use crate::application::ports::faculty_wear_repository::FacultyWearRepository;
use crate::application::ports::media_store::MediaStore;
use crate::domain::faculty_wear::{self, FacultyWear, ImageUpload, WearForm};

pub struct UpdateWear<'a, R, M>
where
    R: FacultyWearRepository + ?Sized,
    M: MediaStore + ?Sized,
{
    pub repo: &'a R,
    pub media: &'a M,
    pub folder: &'a str,
}

impl<'a, R, M> UpdateWear<'a, R, M>
where
    R: FacultyWearRepository + ?Sized,
    M: MediaStore + ?Sized,
{
    /// Replaces every field of an item. The stored image is kept unless a new
    /// one is supplied, in which case the new image is uploaded before the old
    /// one is removed.
    pub async fn execute(
        &self,
        id: Uuid,
        form: &WearForm,
        image: Option<&ImageUpload>,
    ) -> Result<FacultyWear, WearError> {
        let existing = self.repo.get_by_id(id).await?.ok_or(WearError::NotFound)?;
        let draft = faculty_wear::validate(form).map_err(WearError::Validation)?;

        let new_image_url = match image {
            Some(image) => {
                let url = upload_image(self.media, image, self.folder).await?;
                discard_image(self.media, &existing.image_url).await;
                Some(url)
            }
            None => None,
        };

        let updated = self
            .repo
            .update(id, &draft, new_image_url.as_deref())
            .await?
            .ok_or(WearError::NotFound)?;
        tracing::info!(wear_id = %id, image_replaced = new_image_url.is_some(), "faculty_wear_updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeMediaStore, InMemoryWearRepository, draft, image, valid_form};

    async fn setup() -> (InMemoryWearRepository, FakeMediaStore, FacultyWear) {
        let repo = InMemoryWearRepository::default();
        let media = FakeMediaStore::default();
        let mut d = draft("Gown");
        d.custom_price = Some(80.0);
        let wear = repo
            .insert(&d, "https://media.test/faculty_wears/old.png")
            .await
            .unwrap();
        (repo, media, wear)
    }

    #[tokio::test]
    async fn keeps_image_when_none_is_sent() {
        let (repo, media, wear) = setup().await;
        let uc = UpdateWear {
            repo: &repo,
            media: &media,
            folder: "faculty_wears",
        };
        let updated = uc
            .execute(wear.id, &valid_form("Renamed"), None)
            .await
            .unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.image_url, wear.image_url);
        assert_eq!(updated.custom_price, None);
        assert!(updated.updated_at >= wear.updated_at);
        assert!(media.deleted().is_empty());
    }

    #[tokio::test]
    async fn replaces_and_discards_old_image() {
        let (repo, media, wear) = setup().await;
        let uc = UpdateWear {
            repo: &repo,
            media: &media,
            folder: "faculty_wears",
        };
        let updated = uc
            .execute(wear.id, &valid_form("Gown"), Some(&image("new.webp")))
            .await
            .unwrap();
        assert_eq!(updated.image_url, "https://media.test/faculty_wears/new.webp");
        assert_eq!(media.deleted(), vec![wear.image_url.clone()]);
    }

    #[tokio::test]
    async fn failed_upload_leaves_item_untouched() {
        let (repo, media, wear) = setup().await;
        media.fail_uploads(true);
        let uc = UpdateWear {
            repo: &repo,
            media: &media,
            folder: "faculty_wears",
        };
        let err = uc
            .execute(wear.id, &valid_form("Renamed"), Some(&image("new.png")))
            .await
            .unwrap_err();
        assert!(matches!(err, WearError::UploadFailed));
        assert_eq!(repo.get_by_id(wear.id).await.unwrap().unwrap(), wear);
        assert!(media.deleted().is_empty());
    }

    #[tokio::test]
    async fn old_image_delete_failure_is_not_fatal() {
        let (repo, media, wear) = setup().await;
        media.fail_deletes(true);
        let uc = UpdateWear {
            repo: &repo,
            media: &media,
            folder: "faculty_wears",
        };
        let updated = uc
            .execute(wear.id, &valid_form("Gown"), Some(&image("new.jpg")))
            .await
            .unwrap();
        assert_eq!(updated.image_url, "https://media.test/faculty_wears/new.jpg");
    }

    #[tokio::test]
    async fn missing_item_is_reported_before_validation() {
        let (repo, media, _) = setup().await;
        let uc = UpdateWear {
            repo: &repo,
            media: &media,
            folder: "faculty_wears",
        };
        let err = uc
            .execute(Uuid::new_v4(), &WearForm::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, WearError::NotFound));
    }
}
