use crate::models::common::VoteType;
use crate::models::mess::Quote;
use crate::traits::{require_non_blank, Validate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams)]
pub struct MessMenuQuery {
    /// Day of week, e.g. `monday`. Defaults to today on campus.
    pub day: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct MessMenuResponse {
    pub status: String,
    pub day: String,
    pub meals: BTreeMap<String, Vec<String>>,
    pub error: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct MessVoteRequest {
    pub meal: String,
    pub item: String,
    pub vote: VoteType,
}

impl Validate for MessVoteRequest {
    fn validate(&self) -> Result<(), String> {
        require_non_blank("meal", &self.meal)?;
        require_non_blank("item", &self.item)
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessVoteResponse {
    pub success: bool,
    pub likes: i64,
    pub dislikes: i64,
    pub user_vote: Option<VoteType>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct MessUserVotesResponse {
    pub status: String,
    pub date: NaiveDate,
    /// Keyed by `meal:item`.
    pub votes: BTreeMap<String, VoteType>,
    pub error: Option<String>,
}

#[derive(Deserialize, IntoParams)]
pub struct LeaderboardQuery {
    /// Window in days (1..=30, default 7).
    pub days: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    pub meal: String,
    pub item: String,
    pub likes: i64,
    pub dislikes: i64,
    pub score: i64,
}

#[derive(Serialize, ToSchema)]
pub struct LeaderboardResponse {
    pub status: String,
    pub days: u32,
    pub data: Vec<LeaderboardEntry>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct DailyQuoteResponse {
    pub status: String,
    pub data: Option<Quote>,
    pub error: Option<String>,
}
