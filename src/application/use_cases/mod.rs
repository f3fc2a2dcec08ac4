pub mod auth;
pub mod faculty_wear;
