use std::sync::Arc;

use crate::application::ports::faculty_wear_repository::FacultyWearRepository;
use crate::application::ports::media_store::MediaStore;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    wear_repo: Arc<dyn FacultyWearRepository>,
    user_repo: Arc<dyn UserRepository>,
    media_store: Arc<dyn MediaStore>,
}

impl AppServices {
    pub fn new(
        wear_repo: Arc<dyn FacultyWearRepository>,
        user_repo: Arc<dyn UserRepository>,
        media_store: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            wear_repo,
            user_repo,
            media_store,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn wear_repo(&self) -> Arc<dyn FacultyWearRepository> {
        self.services.wear_repo.clone()
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn media_store(&self) -> Arc<dyn MediaStore> {
        self.services.media_store.clone()
    }
}
