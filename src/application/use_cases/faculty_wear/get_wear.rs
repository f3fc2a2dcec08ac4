use uuid::Uuid;

use super::WearError;
use crate::application::ports::faculty_wear_repository::FacultyWearRepository;
use crate::domain::faculty_wear::FacultyWear;

pub struct GetWear<'a, R: FacultyWearRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FacultyWearRepository + ?Sized> GetWear<'a, R> {
    pub async fn execute(&self, id: Uuid) -> Result<FacultyWear, WearError> {
        self.repo.get_by_id(id).await?.ok_or(WearError::NotFound)
    }
}
