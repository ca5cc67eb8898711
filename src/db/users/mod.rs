pub mod notifications;
pub mod user;
