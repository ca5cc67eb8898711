pub mod orders;
pub mod votes;
