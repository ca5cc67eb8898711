mod dashboard;
mod login;

pub(super) use dashboard::{delete_dish, list_dishes, upsert_dishes};
pub(super) use login::admin_login;
