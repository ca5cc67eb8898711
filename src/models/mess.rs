use crate::models::common::VoteType;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::db::schema::mess_menu)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MessMenuRow {
    pub day_of_week: String,
    pub meal: String,
    pub items: Vec<String>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::mess_menu)]
pub struct NewMessMenuRow<'a> {
    pub day_of_week: &'a str,
    pub meal: &'a str,
    pub items: &'a [String],
}

#[derive(Queryable, Selectable, Debug, Clone, Serialize)]
#[diesel(table_name = crate::db::schema::mess_votes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct MessVote {
    pub user_id: i32,
    pub vote_date: NaiveDate,
    pub meal: String,
    pub item_name: String,
    pub vote_type: VoteType,
    pub voted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

/// Weekly menu file: day -> meal -> items, plus the quote rotation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessSeed {
    pub week: std::collections::BTreeMap<String, std::collections::BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    pub quotes: Vec<Quote>,
}
