pub mod admins;
pub mod dishes;
