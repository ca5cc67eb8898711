mod menu;

pub(super) use menu::{daily_quote, leaderboard, mess_menu, mess_user_votes, mess_vote};
