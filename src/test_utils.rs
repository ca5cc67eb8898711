use crate::auth::password::hash_password;
use crate::db::{
    establish_connection_pool, run_db_migrations, DbConnection, DbPool, DishOperations,
    MessOperations, RepositoryError,
};
use crate::enums::admin::DishInput;
use crate::models::mess::{MessSeed, Quote};
use diesel::prelude::*;
use diesel::PgConnection;
use std::collections::BTreeMap;
use std::sync::Once;

// Fixture strategy:
// - Users and admins are inserted directly; dishes go through DishOperations so
//   their availability history is built the same way the API builds it.
// - The test mess menu serves the same meals every day, so "today" always has items.
pub const TEST_DEV_BYPASS_TOKEN: &str = "test-bypass-token";
pub const TEST_FIREBASE_PROJECT_ID: &str = "test-project";
pub const TEST_ADMIN_JWT_SECRET: &str = "test-admin-secret";
pub const TEST_ADMIN_PEPPER: &str = "test-pepper";
pub const TEST_ADMIN_ID: &str = "cafe-admin";
pub const TEST_ADMIN_PASSWORD: &str = "cafe-password";
static TEST_ENV: Once = Once::new();

fn set_env_if_unset(key: &str, value: &str) {
    if std::env::var_os(key).is_none() {
        std::env::set_var(key, value);
    }
}

pub fn init_test_env() {
    TEST_ENV.call_once(|| {
        set_env_if_unset("DEV_BYPASS_TOKEN", TEST_DEV_BYPASS_TOKEN);
        set_env_if_unset("FIREBASE_PROJECT_ID", TEST_FIREBASE_PROJECT_ID);
        set_env_if_unset("ADMIN_JWT_SECRET", TEST_ADMIN_JWT_SECRET);
        set_env_if_unset("ADMIN_PASSWORD_PEPPER", TEST_ADMIN_PEPPER);
    });
}

pub fn test_pepper() -> String {
    std::env::var("ADMIN_PASSWORD_PEPPER").unwrap_or_else(|_| TEST_ADMIN_PEPPER.to_string())
}

pub fn build_test_pool(database_url: &str) -> DbPool {
    let pool = establish_connection_pool(database_url, 4).expect("Unable to build pool");
    run_db_migrations(pool.clone()).expect("Unable to run migrations");
    pool
}

pub fn reset_db(pool: &DbPool) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(pool)?;
    diesel::sql_query(
        "TRUNCATE TABLE order_notifications, orders, dish_comments, dish_user_votes, \
         vote_tallies, availability_periods, dishes, mess_votes, mess_menu, admins, users \
         RESTART IDENTITY CASCADE",
    )
    .execute(conn.connection())
    .map_err(RepositoryError::DatabaseError)?;
    Ok(())
}

pub struct TestFixtures {
    pub user_id: i32,
    pub other_user_id: i32,
    pub admin_id: String,
    /// Open for voting and ordering.
    pub available_dish_id: String,
    /// Has only a closed, zero-length period.
    pub unavailable_dish_id: String,
}

pub fn seed_basic_fixtures(pool: &DbPool) -> Result<TestFixtures, RepositoryError> {
    let mut conn = DbConnection::new(pool)?;

    let user_id = insert_user(
        conn.connection(),
        "test-user-1",
        "user1@example.com",
        "User One",
    )?;
    let other_user_id = insert_user(
        conn.connection(),
        "test-user-2",
        "user2@example.com",
        "User Two",
    )?;
    insert_admin(
        conn.connection(),
        TEST_ADMIN_ID,
        TEST_ADMIN_PASSWORD,
        &test_pepper(),
    )?;

    let dish_ops = DishOperations::new(pool.clone());
    dish_ops.upsert_dishes(vec![
        dish_input("Masala Dosa", 60.0, true, true),
        dish_input("Cold Coffee", 45.0, true, false),
    ])?;

    Ok(TestFixtures {
        user_id,
        other_user_id,
        admin_id: TEST_ADMIN_ID.to_string(),
        available_dish_id: "masala-dosa".to_string(),
        unavailable_dish_id: "cold-coffee".to_string(),
    })
}

pub fn dish_input(name: &str, price: f64, veg: bool, available: bool) -> DishInput {
    DishInput {
        dish_id: None,
        name: name.to_string(),
        price,
        veg,
        available,
    }
}

pub fn insert_user(
    conn: &mut PgConnection,
    firebase_uid_val: &str,
    email_val: &str,
    name_val: &str,
) -> Result<i32, RepositoryError> {
    use crate::db::schema::users::dsl::*;

    diesel::insert_into(users)
        .values((
            firebase_uid.eq(firebase_uid_val),
            email.eq(email_val),
            name.eq(name_val),
        ))
        .returning(user_id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

pub fn insert_admin(
    conn: &mut PgConnection,
    admin_id_val: &str,
    password: &str,
    pepper: &str,
) -> Result<(), RepositoryError> {
    use crate::db::schema::admins::dsl::*;

    diesel::insert_into(admins)
        .values((
            admin_id.eq(admin_id_val),
            password_hash.eq(hash_password(admin_id_val, password, pepper)),
        ))
        .execute(conn)
        .map_err(RepositoryError::DatabaseError)?;
    Ok(())
}

/// Same lunch and dinner on every day of the week, plus two quotes.
pub fn test_mess_seed() -> MessSeed {
    let mut meals = BTreeMap::new();
    meals.insert(
        "lunch".to_string(),
        vec!["Rajma".to_string(), "Jeera Rice".to_string()],
    );
    meals.insert(
        "dinner".to_string(),
        vec!["Paneer Butter Masala".to_string(), "Roti".to_string()],
    );
    let week = [
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
    ]
    .iter()
    .map(|d| (d.to_string(), meals.clone()))
    .collect();

    MessSeed {
        week,
        quotes: vec![
            Quote {
                text: "First we eat, then we do everything else.".to_string(),
                author: "M.F.K. Fisher".to_string(),
            },
            Quote {
                text: "Laughter is brightest where food is best.".to_string(),
                author: "Irish proverb".to_string(),
            },
        ],
    }
}

pub fn seed_mess_menu(mess_ops: &MessOperations) -> Result<usize, RepositoryError> {
    mess_ops.seed_menu(&test_mess_seed())
}
