pub mod availability;
pub mod mess_calendar;
pub mod order_flow;
pub mod vote_toggle;
