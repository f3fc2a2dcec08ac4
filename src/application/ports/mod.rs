pub mod faculty_wear_repository;
pub mod media_store;
pub mod user_repository;
