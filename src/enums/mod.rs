pub mod admin;
pub mod common;
pub mod mess;
pub mod users;
