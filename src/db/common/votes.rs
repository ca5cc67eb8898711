use crate::db::errors::RepositoryError;
use crate::db::schema::{availability_periods, dish_comments, dish_user_votes, dishes, vote_tallies};
use crate::db::{DbConnection, DbPool};
use crate::enums::common::{DishVoteSummary, UserVoteEntry};
use crate::models::common::{DishComment, NewDishComment, VoteTally, VoteType};
use crate::services::vote_toggle::{resolve, Tally};
use chrono::{DateTime, Utc};
use diesel::dsl::max;
use diesel::prelude::*;
use diesel::result::Error;
use log::{debug, error};
use std::collections::{BTreeMap, HashMap};

#[derive(Clone)]
pub struct VoteOperations {
    pool: DbPool,
}

fn lock_dish(conn: &mut PgConnection, target_dish_id: &str) -> Result<String, RepositoryError> {
    dishes::table
        .find(target_dish_id)
        .for_update()
        .select(dishes::name)
        .first::<String>(conn)
        .map_err(|e| match e {
            Error::NotFound => RepositoryError::NotFound(format!("dishes: {target_dish_id}")),
            other => RepositoryError::DatabaseError(other),
        })
}

fn latest_period_ids(conn: &mut PgConnection) -> Result<HashMap<String, i32>, RepositoryError> {
    let rows = availability_periods::table
        .group_by(availability_periods::dish_id)
        .select((availability_periods::dish_id, max(availability_periods::period_id)))
        .load::<(String, Option<i32>)>(conn)?;
    Ok(rows
        .into_iter()
        .filter_map(|(id, latest)| latest.map(|p| (id, p)))
        .collect())
}

impl VoteOperations {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Applies the like/dislike toggle for `voter_id` against the dish's open period.
    ///
    /// The dish row stays locked for the whole transaction, so the stored tally
    /// always equals the set of per-user votes in that period. Returns the
    /// updated tally and the vote the user holds afterwards.
    pub fn cast_vote(
        &self,
        voter_id: i32,
        target_dish_id: &str,
        incoming: VoteType,
    ) -> Result<(VoteTally, Option<VoteType>), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("cast_vote: failed to acquire DB connection: {}", e);
            e
        })?;

        conn.connection()
            .transaction(|conn| {
                let dish_name = lock_dish(conn, target_dish_id)?;

                let open_period = availability_periods::table
                    .filter(availability_periods::dish_id.eq(target_dish_id))
                    .filter(availability_periods::available_to.is_null())
                    .select(availability_periods::period_id)
                    .first::<i32>(conn)
                    .optional()?
                    .ok_or_else(|| {
                        RepositoryError::NotAvailable(format!(
                            "{dish_name} is not available for voting right now"
                        ))
                    })?;

                let existing = dish_user_votes::table
                    .find((voter_id, target_dish_id, open_period))
                    .select(dish_user_votes::vote_type)
                    .first::<VoteType>(conn)
                    .optional()?;

                let outcome = resolve(existing, incoming);
                match outcome.record {
                    None => {
                        diesel::delete(dish_user_votes::table.find((
                            voter_id,
                            target_dish_id,
                            open_period,
                        )))
                        .execute(conn)?;
                    }
                    Some(kept) => {
                        let now = Utc::now();
                        diesel::insert_into(dish_user_votes::table)
                            .values((
                                dish_user_votes::user_id.eq(voter_id),
                                dish_user_votes::dish_id.eq(target_dish_id),
                                dish_user_votes::period_id.eq(open_period),
                                dish_user_votes::vote_type.eq(kept),
                                dish_user_votes::voted_at.eq(now),
                            ))
                            .on_conflict((
                                dish_user_votes::user_id,
                                dish_user_votes::dish_id,
                                dish_user_votes::period_id,
                            ))
                            .do_update()
                            .set((
                                dish_user_votes::vote_type.eq(kept),
                                dish_user_votes::voted_at.eq(now),
                            ))
                            .execute(conn)?;
                    }
                }

                let current = vote_tallies::table
                    .find(open_period)
                    .select(VoteTally::as_select())
                    .first::<VoteTally>(conn)?;
                let next = Tally {
                    likes: current.likes,
                    dislikes: current.dislikes,
                }
                .apply(&outcome);

                let updated = diesel::update(vote_tallies::table.find(open_period))
                    .set((
                        vote_tallies::likes.eq(next.likes),
                        vote_tallies::dislikes.eq(next.dislikes),
                    ))
                    .returning(VoteTally::as_returning())
                    .get_result::<VoteTally>(conn)?;

                debug!(
                    "cast_vote: user {} on {} (period {}): {:?} -> {:?}",
                    voter_id, target_dish_id, open_period, existing, outcome.record
                );
                Ok((updated, outcome.record))
            })
            .map_err(|e: RepositoryError| {
                if let RepositoryError::DatabaseError(inner) = &e {
                    error!(
                        "cast_vote: error recording vote of user {} on {}: {}",
                        voter_id, target_dish_id, inner
                    );
                }
                e
            })
    }

    /// Stores a comment against the dish's most recent period.
    pub fn add_feedback(
        &self,
        author_id: i32,
        author_name: &str,
        target_dish_id: &str,
        text: &str,
    ) -> Result<DishComment, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("add_feedback: failed to acquire DB connection: {}", e);
            e
        })?;

        conn.connection().transaction(|conn| {
            lock_dish(conn, target_dish_id)?;

            let latest = availability_periods::table
                .filter(availability_periods::dish_id.eq(target_dish_id))
                .select(max(availability_periods::period_id))
                .first::<Option<i32>>(conn)?
                .ok_or_else(|| {
                    RepositoryError::NotAvailable(format!(
                        "{target_dish_id} has never been on the menu"
                    ))
                })?;

            diesel::insert_into(dish_comments::table)
                .values(&NewDishComment {
                    dish_id: target_dish_id,
                    period_id: latest,
                    user_id: author_id,
                    user_name: author_name,
                    comment: text.trim(),
                })
                .returning(DishComment::as_returning())
                .get_result::<DishComment>(conn)
                .map_err(|e| {
                    error!(
                        "add_feedback: error inserting comment for {}: {}",
                        target_dish_id, e
                    );
                    RepositoryError::DatabaseError(e)
                })
        })
    }

    /// Live tally and comments of every dish, keyed by dish id.
    pub fn dish_vote_summaries(&self) -> Result<BTreeMap<String, DishVoteSummary>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("dish_vote_summaries: failed to acquire DB connection: {}", e);
            e
        })?;
        let conn = conn.connection();

        let names = dishes::table
            .select((dishes::dish_id, dishes::name))
            .load::<(String, String)>(conn)?;
        let latest = latest_period_ids(conn)?;
        let live_ids: Vec<i32> = latest.values().copied().collect();
        let tallies: HashMap<i32, VoteTally> = vote_tallies::table
            .filter(vote_tallies::period_id.eq_any(&live_ids))
            .select(VoteTally::as_select())
            .load::<VoteTally>(conn)?
            .into_iter()
            .map(|t| (t.period_id, t))
            .collect();
        let comments = dish_comments::table
            .order((dish_comments::created_at.asc(), dish_comments::comment_id.asc()))
            .select(DishComment::as_select())
            .load::<DishComment>(conn)
            .map_err(|e| {
                error!("dish_vote_summaries: error loading comments: {}", e);
                RepositoryError::DatabaseError(e)
            })?;

        let mut summaries: BTreeMap<String, DishVoteSummary> = names
            .into_iter()
            .map(|(id, dish_name)| {
                let tally = latest.get(&id).and_then(|p| tallies.get(p));
                let summary = DishVoteSummary {
                    dish_name,
                    likes: tally.map_or(0, |t| t.likes),
                    dislikes: tally.map_or(0, |t| t.dislikes),
                    current_comments: Vec::new(),
                    past_comments: Vec::new(),
                };
                (id, summary)
            })
            .collect();

        for comment in comments {
            let is_current = latest.get(&comment.dish_id) == Some(&comment.period_id);
            if let Some(summary) = summaries.get_mut(&comment.dish_id) {
                if is_current {
                    summary.current_comments.push(comment);
                } else {
                    summary.past_comments.push(comment);
                }
            }
        }

        Ok(summaries)
    }

    /// The user's most recent vote per dish. Votes in closed periods are kept
    /// and reported with `is_current == false`.
    pub fn user_votes(&self, voter_id: i32) -> Result<BTreeMap<String, UserVoteEntry>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("user_votes: failed to acquire DB connection: {}", e);
            e
        })?;

        let rows = dish_user_votes::table
            .inner_join(availability_periods::table)
            .filter(dish_user_votes::user_id.eq(voter_id))
            .order((dish_user_votes::dish_id.asc(), dish_user_votes::period_id.asc()))
            .select((
                dish_user_votes::dish_id,
                dish_user_votes::vote_type,
                dish_user_votes::voted_at,
                dish_user_votes::period_id,
                availability_periods::available_from,
                availability_periods::available_to,
            ))
            .load::<(
                String,
                VoteType,
                DateTime<Utc>,
                i32,
                DateTime<Utc>,
                Option<DateTime<Utc>>,
            )>(conn.connection())
            .map_err(|e| {
                error!("user_votes: error loading votes of user {}: {}", voter_id, e);
                RepositoryError::DatabaseError(e)
            })?;

        // ordered by period, so the last insert per dish wins
        let mut votes = BTreeMap::new();
        for (id, vote_type, timestamp, period_id, period_started_at, available_to) in rows {
            votes.insert(
                id,
                UserVoteEntry {
                    vote_type,
                    timestamp,
                    period_id,
                    period_started_at,
                    is_current: available_to.is_none(),
                },
            );
        }
        Ok(votes)
    }
}
