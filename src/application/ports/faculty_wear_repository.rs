use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::faculty_wear::{FacultyWear, WearDraft};

#[async_trait]
pub trait FacultyWearRepository: Send + Sync {
    /// Page of items sorted by display order. `search` is matched
    /// case-insensitively against title, description and badge text.
    async fn list(
        &self,
        search: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> anyhow::Result<Vec<FacultyWear>>;

    async fn count(&self, search: Option<&str>) -> anyhow::Result<i64>;

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<FacultyWear>>;

    async fn insert(&self, draft: &WearDraft, image_url: &str) -> anyhow::Result<FacultyWear>;

    // image_url: None keeps the stored image
    async fn update(
        &self,
        id: Uuid,
        draft: &WearDraft,
        image_url: Option<&str>,
    ) -> anyhow::Result<Option<FacultyWear>>;

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
