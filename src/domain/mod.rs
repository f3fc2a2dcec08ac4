pub mod faculty_wear;
