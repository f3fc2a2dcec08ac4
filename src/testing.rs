//! In-memory ports for unit and router tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::faculty_wear_repository::FacultyWearRepository;
use crate::application::ports::media_store::{MediaStore, StoredMedia};
use crate::application::ports::user_repository::{DuplicateEmail, UserRepository, UserRow};
use crate::domain::faculty_wear::{FacultyWear, ImageUpload, WearDraft, WearForm};

pub fn draft(title: &str) -> WearDraft {
    WearDraft {
        title: title.to_string(),
        description: format!("{title} description"),
        badge_text: String::new(),
        standard_price: 40.0,
        custom_price: None,
        add_to_cart_text: "Add to Cart".into(),
        add_to_cart_link: String::new(),
        buy_now_text: "Buy Now".into(),
        buy_now_link: String::new(),
        display_order: 1,
    }
}

pub fn valid_form(title: &str) -> WearForm {
    WearForm {
        title: Some(title.to_string()),
        description: Some(format!("{title} description")),
        standard_price: Some("40".into()),
        order: Some("1".into()),
        ..Default::default()
    }
}

pub fn image(filename: &str) -> ImageUpload {
    ImageUpload {
        filename: filename.to_string(),
        content_type: Some("image/png".into()),
        bytes: vec![0x89, b'P', b'N', b'G'],
    }
}

#[derive(Default)]
pub struct InMemoryWearRepository {
    rows: Mutex<Vec<FacultyWear>>,
}

impl InMemoryWearRepository {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn matching(&self, search: Option<&str>) -> Vec<FacultyWear> {
        let needle = search.map(str::to_lowercase);
        let mut rows: Vec<FacultyWear> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|w| match &needle {
                None => true,
                Some(n) => [&w.title, &w.description, &w.badge_text]
                    .iter()
                    .any(|field| field.to_lowercase().contains(n.as_str())),
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        rows
    }
}

fn apply(target: &mut FacultyWear, draft: &WearDraft) {
    target.title = draft.title.clone();
    target.description = draft.description.clone();
    target.badge_text = draft.badge_text.clone();
    target.standard_price = draft.standard_price;
    target.custom_price = draft.custom_price;
    target.add_to_cart_text = draft.add_to_cart_text.clone();
    target.add_to_cart_link = draft.add_to_cart_link.clone();
    target.buy_now_text = draft.buy_now_text.clone();
    target.buy_now_link = draft.buy_now_link.clone();
    target.display_order = draft.display_order;
}

#[async_trait]
impl FacultyWearRepository for InMemoryWearRepository {
    async fn list(
        &self,
        search: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> anyhow::Result<Vec<FacultyWear>> {
        Ok(self
            .matching(search)
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self, search: Option<&str>) -> anyhow::Result<i64> {
        Ok(self.matching(search).len() as i64)
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<FacultyWear>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.id == id)
            .cloned())
    }

    async fn insert(&self, draft: &WearDraft, image_url: &str) -> anyhow::Result<FacultyWear> {
        let now = chrono::Utc::now();
        let mut wear = FacultyWear {
            id: Uuid::new_v4(),
            title: String::new(),
            description: String::new(),
            image_url: image_url.to_string(),
            badge_text: String::new(),
            standard_price: 0.0,
            custom_price: None,
            add_to_cart_text: String::new(),
            add_to_cart_link: String::new(),
            buy_now_text: String::new(),
            buy_now_link: String::new(),
            display_order: 1,
            created_at: now,
            updated_at: now,
        };
        apply(&mut wear, draft);
        self.rows.lock().unwrap().push(wear.clone());
        Ok(wear)
    }

    async fn update(
        &self,
        id: Uuid,
        draft: &WearDraft,
        image_url: Option<&str>,
    ) -> anyhow::Result<Option<FacultyWear>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(wear) = rows.iter_mut().find(|w| w.id == id) else {
            return Ok(None);
        };
        apply(wear, draft);
        if let Some(url) = image_url {
            wear.image_url = url.to_string();
        }
        wear.updated_at = chrono::Utc::now();
        Ok(Some(wear.clone()))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|w| w.id != id);
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
pub struct FakeMediaStore {
    uploaded: Mutex<Vec<String>>,
    deleted: Mutex<Vec<String>>,
    fail_uploads: AtomicBool,
    fail_deletes: AtomicBool,
}

impl FakeMediaStore {
    pub fn uploaded(&self) -> Vec<String> {
        self.uploaded.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl MediaStore for FakeMediaStore {
    async fn upload_image(
        &self,
        image: &ImageUpload,
        folder: &str,
    ) -> anyhow::Result<StoredMedia> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            anyhow::bail!("upload rejected by provider");
        }
        let public_id = format!("{folder}/{}", image.filename);
        self.uploaded.lock().unwrap().push(public_id.clone());
        Ok(StoredMedia {
            url: format!("https://media.test/{public_id}"),
            public_id,
            size: image.bytes.len() as i64,
        })
    }

    async fn delete_by_url(&self, url: &str) -> anyhow::Result<bool> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            anyhow::bail!("provider unavailable");
        }
        self.deleted.lock().unwrap().push(url.to_string());
        Ok(true)
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<UserRow>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> anyhow::Result<UserRow> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == email) {
            return Err(DuplicateEmail(email.to_string()).into());
        }
        let row = UserRow {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: name.to_string(),
            password_hash: Some(password_hash.to_string()),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .map(|u| UserRow {
                password_hash: None,
                ..u.clone()
            }))
    }
}
