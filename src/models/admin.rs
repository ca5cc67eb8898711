use crate::services::availability::Period;
use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable, Selectable};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize, ToSchema)]
#[diesel(table_name = crate::db::schema::dishes)]
#[diesel(primary_key(dish_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub dish_id: String,
    pub name: String,
    pub price: f64,
    #[serde(rename = "veg")]
    pub is_veg: bool,
    #[serde(rename = "available")]
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::dishes)]
pub struct NewDish<'a> {
    pub dish_id: &'a str,
    pub name: &'a str,
    pub price: f64,
    pub is_veg: bool,
    pub is_available: bool,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::db::schema::availability_periods)]
#[diesel(primary_key(period_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AvailabilityPeriod {
    pub period_id: i32,
    pub dish_id: String,
    pub available_from: DateTime<Utc>,
    pub available_to: Option<DateTime<Utc>>,
}

impl From<AvailabilityPeriod> for Period {
    fn from(row: AvailabilityPeriod) -> Self {
        Period {
            period_id: row.period_id,
            available_from: row.available_from,
            available_to: row.available_to,
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::availability_periods)]
pub struct NewAvailabilityPeriod<'a> {
    pub dish_id: &'a str,
    pub available_from: DateTime<Utc>,
    pub available_to: Option<DateTime<Utc>>,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::db::schema::admins)]
#[diesel(primary_key(admin_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Admin {
    pub admin_id: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A dish together with its full availability history, oldest period first.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DishRecord {
    #[serde(flatten)]
    pub dish: Dish,
    pub availability_history: Vec<Period>,
}

/// Lower-cases `raw` and collapses every run of separators (whitespace, ASCII
/// punctuation, control characters) into a single `-`, so "Masala  Dosa!" and
/// "masala-dosa" share one id. Non-ASCII text such as "भिण्डी" is kept as is.
pub fn normalize_dish_id(raw: &str) -> String {
    let mut id = String::with_capacity(raw.len());
    let mut pending_dash = false;
    for c in raw.trim().chars() {
        if is_id_char(c) {
            if pending_dash && !id.is_empty() {
                id.push('-');
            }
            pending_dash = false;
            id.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    id
}

/// Normalized id from an explicit `dishId`, falling back to `dishName` when the
/// id is missing or blank. `None` when neither yields a usable id.
pub fn dish_id_or_name(dish_id: Option<&str>, dish_name: Option<&str>) -> Option<String> {
    let raw = dish_id.filter(|id| !id.trim().is_empty()).or(dish_name)?;
    let id = normalize_dish_id(raw);
    (!id.is_empty()).then_some(id)
}

fn is_id_char(c: char) -> bool {
    if c.is_ascii() {
        c.is_ascii_alphanumeric()
    } else {
        !c.is_whitespace() && !c.is_control()
    }
}
