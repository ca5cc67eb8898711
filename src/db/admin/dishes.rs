use crate::db::errors::RepositoryError;
use crate::db::schema::{availability_periods, dish_user_votes, dishes, vote_tallies};
use crate::db::{DbConnection, DbPool};
use crate::enums::admin::DishInput;
use crate::models::admin::{
    AvailabilityPeriod, Dish, DishRecord, NewAvailabilityPeriod, NewDish,
};
use crate::services::availability::{AvailabilityChange, AvailabilityHistory, Period};
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::Error;
use log::{debug, error, info};
use std::collections::{HashMap, HashSet};

#[derive(Clone)]
pub struct DishOperations {
    pool: DbPool,
}

pub(crate) fn load_histories(
    conn: &mut PgConnection,
    ids: &[String],
) -> Result<HashMap<String, Vec<Period>>, RepositoryError> {
    let rows = availability_periods::table
        .filter(availability_periods::dish_id.eq_any(ids))
        .order((
            availability_periods::dish_id.asc(),
            availability_periods::period_id.asc(),
        ))
        .select(AvailabilityPeriod::as_select())
        .load::<AvailabilityPeriod>(conn)?;

    let mut grouped: HashMap<String, Vec<Period>> = HashMap::new();
    for row in rows {
        grouped.entry(row.dish_id.clone()).or_default().push(row.into());
    }
    Ok(grouped)
}

fn attach_histories(
    conn: &mut PgConnection,
    found: Vec<Dish>,
) -> Result<Vec<DishRecord>, RepositoryError> {
    let ids: Vec<String> = found.iter().map(|d| d.dish_id.clone()).collect();
    let mut histories = load_histories(conn, &ids)?;
    Ok(found
        .into_iter()
        .map(|dish| {
            let periods = histories.remove(&dish.dish_id).unwrap_or_default();
            DishRecord {
                availability_history: AvailabilityHistory::new(periods).into_periods(),
                dish,
            }
        })
        .collect())
}

/// Inserts a period plus its zeroed tally. Returns the new period id.
fn insert_period(
    conn: &mut PgConnection,
    dish_id_val: &str,
    period: &Period,
) -> Result<i32, RepositoryError> {
    let new_period_id = diesel::insert_into(availability_periods::table)
        .values(&NewAvailabilityPeriod {
            dish_id: dish_id_val,
            available_from: period.available_from,
            available_to: period.available_to,
        })
        .returning(availability_periods::period_id)
        .get_result::<i32>(conn)?;

    diesel::insert_into(vote_tallies::table)
        .values((
            vote_tallies::period_id.eq(new_period_id),
            vote_tallies::dish_id.eq(dish_id_val),
        ))
        .execute(conn)?;

    Ok(new_period_id)
}

/// Persists the change the tracker applied to `history` in memory.
fn persist_change(
    conn: &mut PgConnection,
    dish_id_val: &str,
    change: AvailabilityChange,
    history: &AvailabilityHistory,
) -> Result<(), RepositoryError> {
    let Some(latest) = history.latest() else {
        return Ok(());
    };
    match change {
        AvailabilityChange::Start { .. } | AvailabilityChange::Open { .. } => {
            let new_id = insert_period(conn, dish_id_val, latest)?;
            debug!(
                "dish {}: opened availability period {} (closed: {})",
                dish_id_val,
                new_id,
                latest.available_to.is_some()
            );
        }
        AvailabilityChange::Close { period_id, .. } => {
            diesel::update(availability_periods::table.find(period_id))
                .set(availability_periods::available_to.eq(latest.available_to))
                .execute(conn)?;
            debug!("dish {}: closed availability period {}", dish_id_val, period_id);
        }
        AvailabilityChange::Unchanged => {}
    }
    Ok(())
}

impl DishOperations {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Creates or updates every dish in one transaction and tracks availability windows.
    pub fn upsert_dishes(&self, items: Vec<DishInput>) -> Result<Vec<DishRecord>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("upsert_dishes: failed to acquire DB connection: {}", e);
            e
        })?;

        let ids: Vec<String> = items.iter().map(DishInput::normalized_id).collect();
        let now = Utc::now();

        conn.connection()
            .transaction(|conn| {
                let existing: HashSet<String> = dishes::table
                    .filter(dishes::dish_id.eq_any(&ids))
                    .for_update()
                    .select(dishes::dish_id)
                    .load::<String>(conn)?
                    .into_iter()
                    .collect();
                let mut histories = load_histories(conn, &ids)?;

                for (item, id) in items.iter().zip(ids.iter()) {
                    let trimmed_name = item.name.trim();
                    if existing.contains(id) {
                        diesel::update(dishes::table.find(id))
                            .set((
                                dishes::name.eq(trimmed_name),
                                dishes::price.eq(item.price),
                                dishes::is_veg.eq(item.veg),
                                dishes::is_available.eq(item.available),
                                dishes::updated_at.eq(now),
                            ))
                            .execute(conn)?;
                    } else {
                        diesel::insert_into(dishes::table)
                            .values(&NewDish {
                                dish_id: id,
                                name: trimmed_name,
                                price: item.price,
                                is_veg: item.veg,
                                is_available: item.available,
                            })
                            .execute(conn)?;
                    }

                    let mut history =
                        AvailabilityHistory::new(histories.remove(id).unwrap_or_default());
                    // the real id comes from the insert in persist_change
                    let change = history.apply(item.available, now, || 0);
                    persist_change(conn, id, change, &history)?;
                }

                let found = dishes::table
                    .filter(dishes::dish_id.eq_any(&ids))
                    .order(dishes::name.asc())
                    .select(Dish::as_select())
                    .load::<Dish>(conn)?;
                attach_histories(conn, found)
            })
            .map_err(|e: RepositoryError| {
                error!("upsert_dishes: error upserting dishes {:?}: {}", ids, e);
                e
            })
    }

    pub fn list_dishes(&self, only_available: bool) -> Result<Vec<DishRecord>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_dishes: failed to acquire DB connection: {}", e);
            e
        })?;

        let mut query = dishes::table.select(Dish::as_select()).into_boxed();
        if only_available {
            query = query.filter(dishes::is_available.eq(true));
        }
        let found = query
            .order(dishes::name.asc())
            .load::<Dish>(conn.connection())
            .map_err(|e| {
                error!("list_dishes: error fetching dishes: {}", e);
                RepositoryError::DatabaseError(e)
            })?;

        attach_histories(conn.connection(), found)
    }

    pub fn get_dish(&self, search_dish_id: &str) -> Result<DishRecord, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_dish: failed to acquire DB connection for id {}: {}",
                search_dish_id, e
            );
            e
        })?;

        let dish = dishes::table
            .find(search_dish_id)
            .select(Dish::as_select())
            .first::<Dish>(conn.connection())
            .map_err(|e| match e {
                Error::NotFound => RepositoryError::NotFound(format!("dishes: {search_dish_id}")),
                other => RepositoryError::DatabaseError(other),
            })?;

        attach_histories(conn.connection(), vec![dish])?
            .pop()
            .ok_or_else(|| RepositoryError::NotFound(format!("dishes: {search_dish_id}")))
    }

    /// Removes a dish with its periods, tallies, comments and every user's votes.
    pub fn delete_dish(&self, target_dish_id: &str) -> Result<Dish, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "delete_dish: failed to acquire DB connection for id {}: {}",
                target_dish_id, e
            );
            e
        })?;

        conn.connection().transaction(|conn| {
            let removed_votes = diesel::delete(
                dish_user_votes::table.filter(dish_user_votes::dish_id.eq(target_dish_id)),
            )
            .execute(conn)?;

            let removed = diesel::delete(dishes::table.find(target_dish_id))
                .returning(Dish::as_returning())
                .get_result::<Dish>(conn)
                .map_err(|e| {
                    error!(
                        "delete_dish: error deleting dish with id {}: {}",
                        target_dish_id, e
                    );
                    match e {
                        Error::NotFound => {
                            RepositoryError::NotFound(format!("dishes: {target_dish_id}"))
                        }
                        other => RepositoryError::DatabaseError(other),
                    }
                })?;

            info!(
                "delete_dish: removed dish {} and {} user votes",
                removed.dish_id, removed_votes
            );
            Ok(removed)
        })
    }
}
