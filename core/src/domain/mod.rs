pub mod common;
pub mod recipe;
pub mod vision;
