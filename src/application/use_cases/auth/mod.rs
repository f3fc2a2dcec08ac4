pub mod ensure_admin;
pub mod login;
pub mod me;
pub mod register;
