use crate::db::errors::RepositoryError;
use crate::db::schema::{mess_menu, mess_votes};
use crate::db::{DbConnection, DbPool};
use crate::enums::mess::LeaderboardEntry;
use crate::models::common::VoteType;
use crate::models::mess::{MessMenuRow, MessSeed, NewMessMenuRow, Quote};
use crate::services::mess_calendar::{campus_date, day_name, parse_day, quote_index};
use crate::services::vote_toggle::resolve;
use chrono::{Datelike, Days, FixedOffset, NaiveDate, Utc, Weekday};
use diesel::dsl::count_star;
use diesel::prelude::*;
use log::{debug, error, info, warn};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

#[derive(Clone)]
pub struct MessOperations {
    pool: DbPool,
    quotes: Arc<Vec<Quote>>,
    tz: FixedOffset,
}

fn count_votes(
    conn: &mut PgConnection,
    date: NaiveDate,
    meal_name: &str,
    item: &str,
) -> Result<(i64, i64), RepositoryError> {
    let rows = mess_votes::table
        .filter(mess_votes::vote_date.eq(date))
        .filter(mess_votes::meal.eq(meal_name))
        .filter(mess_votes::item_name.eq(item))
        .group_by(mess_votes::vote_type)
        .select((mess_votes::vote_type, count_star()))
        .load::<(VoteType, i64)>(conn)?;

    Ok(rows.into_iter().fold((0, 0), |(l, d), (kind, n)| match kind {
        VoteType::Like => (l + n, d),
        VoteType::Dislike => (l, d + n),
    }))
}

impl MessOperations {
    pub fn new(pool: DbPool, quotes: Vec<Quote>, tz: FixedOffset) -> Self {
        Self {
            pool,
            quotes: Arc::new(quotes),
            tz,
        }
    }

    pub fn today(&self) -> NaiveDate {
        campus_date(Utc::now(), self.tz)
    }

    /// Writes the weekly menu only when the table is still empty. Returns the
    /// number of rows inserted.
    pub fn seed_menu(&self, seed: &MessSeed) -> Result<usize, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("seed_menu: failed to acquire DB connection: {}", e);
            e
        })?;

        conn.connection().transaction(|conn| {
            let existing: i64 = mess_menu::table.count().get_result(conn)?;
            if existing > 0 {
                debug!("seed_menu: {} menu rows present, skipping seed", existing);
                return Ok(0);
            }

            let mut rows = Vec::new();
            for (day, meals) in &seed.week {
                let Some(weekday) = parse_day(day) else {
                    warn!("seed_menu: ignoring unknown day '{}'", day);
                    continue;
                };
                for (meal_name, items) in meals {
                    rows.push((day_name(weekday), meal_name.trim().to_lowercase(), items));
                }
            }

            let new_rows: Vec<NewMessMenuRow> = rows
                .iter()
                .map(|(day, meal_name, items)| NewMessMenuRow {
                    day_of_week: day,
                    meal: meal_name,
                    items: items.as_slice(),
                })
                .collect();

            let inserted = diesel::insert_into(mess_menu::table)
                .values(&new_rows)
                .on_conflict_do_nothing()
                .execute(conn)?;
            info!("seed_menu: seeded {} mess menu rows", inserted);
            Ok(inserted)
        })
    }

    /// Meal -> items for one day of the week.
    pub fn menu_for_day(&self, day: Weekday) -> Result<BTreeMap<String, Vec<String>>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("menu_for_day: failed to acquire DB connection: {}", e);
            e
        })?;

        let rows = mess_menu::table
            .filter(mess_menu::day_of_week.eq(day_name(day)))
            .select(MessMenuRow::as_select())
            .load::<MessMenuRow>(conn.connection())
            .map_err(|e| {
                error!("menu_for_day: error loading menu for {}: {}", day_name(day), e);
                RepositoryError::DatabaseError(e)
            })?;

        Ok(rows.into_iter().map(|r| (r.meal, r.items)).collect())
    }

    /// Toggles a vote on a menu item served on `date`. Returns the item's
    /// counts for that date and the vote the user holds afterwards.
    pub fn cast_vote_on(
        &self,
        date: NaiveDate,
        voter_id: i32,
        meal_name: &str,
        item: &str,
        incoming: VoteType,
    ) -> Result<(i64, i64, Option<VoteType>), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("cast_vote_on: failed to acquire DB connection: {}", e);
            e
        })?;

        let meal_key = meal_name.trim().to_lowercase();
        let day = day_name(date.weekday());

        conn.connection().transaction(|conn| {
            // the menu row doubles as the lock serialising votes on this meal
            let served = mess_menu::table
                .find((day, &meal_key))
                .for_update()
                .select(mess_menu::items)
                .first::<Vec<String>>(conn)
                .optional()?
                .ok_or_else(|| {
                    RepositoryError::NotAvailable(format!("no {meal_key} is served on {day}"))
                })?;

            let canonical = served
                .iter()
                .find(|s| s.eq_ignore_ascii_case(item.trim()))
                .cloned()
                .ok_or_else(|| {
                    RepositoryError::NotAvailable(format!(
                        "{} is not on the {} menu for {}",
                        item.trim(),
                        meal_key,
                        day
                    ))
                })?;

            let key = (voter_id, date, meal_key.as_str(), canonical.as_str());
            let existing = mess_votes::table
                .find(key)
                .select(mess_votes::vote_type)
                .first::<VoteType>(conn)
                .optional()?;

            let outcome = resolve(existing, incoming);
            match outcome.record {
                None => {
                    diesel::delete(mess_votes::table.find(key)).execute(conn)?;
                }
                Some(kept) => {
                    let now = Utc::now();
                    diesel::insert_into(mess_votes::table)
                        .values((
                            mess_votes::user_id.eq(voter_id),
                            mess_votes::vote_date.eq(date),
                            mess_votes::meal.eq(&meal_key),
                            mess_votes::item_name.eq(&canonical),
                            mess_votes::vote_type.eq(kept),
                            mess_votes::voted_at.eq(now),
                        ))
                        .on_conflict((
                            mess_votes::user_id,
                            mess_votes::vote_date,
                            mess_votes::meal,
                            mess_votes::item_name,
                        ))
                        .do_update()
                        .set((mess_votes::vote_type.eq(kept), mess_votes::voted_at.eq(now)))
                        .execute(conn)?;
                }
            }

            let (likes, dislikes) = count_votes(conn, date, &meal_key, &canonical)?;
            Ok((likes, dislikes, outcome.record))
        })
    }

    pub fn cast_vote(
        &self,
        voter_id: i32,
        meal_name: &str,
        item: &str,
        incoming: VoteType,
    ) -> Result<(i64, i64, Option<VoteType>), RepositoryError> {
        self.cast_vote_on(self.today(), voter_id, meal_name, item, incoming)
    }

    /// `meal:item` -> vote for everything the user voted on `date`.
    pub fn user_votes(
        &self,
        voter_id: i32,
        date: NaiveDate,
    ) -> Result<BTreeMap<String, VoteType>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("user_votes: failed to acquire DB connection: {}", e);
            e
        })?;

        let rows = mess_votes::table
            .filter(mess_votes::user_id.eq(voter_id))
            .filter(mess_votes::vote_date.eq(date))
            .select((mess_votes::meal, mess_votes::item_name, mess_votes::vote_type))
            .load::<(String, String, VoteType)>(conn.connection())
            .map_err(|e| {
                error!("user_votes: error loading mess votes of user {}: {}", voter_id, e);
                RepositoryError::DatabaseError(e)
            })?;

        Ok(rows
            .into_iter()
            .map(|(meal_name, item, vote)| (format!("{meal_name}:{item}"), vote))
            .collect())
    }

    /// Items ranked by net score over the `days` days ending on `today`.
    pub fn leaderboard(
        &self,
        today: NaiveDate,
        days: u32,
    ) -> Result<Vec<LeaderboardEntry>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("leaderboard: failed to acquire DB connection: {}", e);
            e
        })?;

        let since = today
            .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
            .unwrap_or(NaiveDate::MIN);

        let rows = mess_votes::table
            .filter(mess_votes::vote_date.between(since, today))
            .group_by((mess_votes::meal, mess_votes::item_name, mess_votes::vote_type))
            .select((
                mess_votes::meal,
                mess_votes::item_name,
                mess_votes::vote_type,
                count_star(),
            ))
            .load::<(String, String, VoteType, i64)>(conn.connection())
            .map_err(|e| {
                error!("leaderboard: error aggregating mess votes: {}", e);
                RepositoryError::DatabaseError(e)
            })?;

        let mut totals: HashMap<(String, String), (i64, i64)> = HashMap::new();
        for (meal_name, item, kind, n) in rows {
            let entry = totals.entry((meal_name, item)).or_default();
            match kind {
                VoteType::Like => entry.0 += n,
                VoteType::Dislike => entry.1 += n,
            }
        }

        let mut board: Vec<LeaderboardEntry> = totals
            .into_iter()
            .map(|((meal, item), (likes, dislikes))| LeaderboardEntry {
                meal,
                item,
                likes,
                dislikes,
                score: likes - dislikes,
            })
            .collect();
        board.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(b.likes.cmp(&a.likes))
                .then_with(|| a.item.cmp(&b.item))
                .then_with(|| a.meal.cmp(&b.meal))
        });
        Ok(board)
    }

    pub fn quote_for(&self, date: NaiveDate) -> Option<Quote> {
        quote_index(date, self.quotes.len()).and_then(|i| self.quotes.get(i).cloned())
    }
}
