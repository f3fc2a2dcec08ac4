pub mod faculty_wear_repository_sqlx;
pub mod user_repository_sqlx;
