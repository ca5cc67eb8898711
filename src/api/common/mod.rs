mod menu;
mod orders;
mod votes;

pub(super) use menu::get_menu;
pub(super) use orders::{create_order, list_orders, my_orders, update_order_status};
pub(super) use votes::{cast_vote, dish_votes, submit_feedback, user_votes};
