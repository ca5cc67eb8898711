mod common;

use campus_eats::db::schema::{dish_comments, dish_user_votes, vote_tallies};
use campus_eats::db::{DbConnection, DishOperations, RepositoryError, VoteOperations};
use campus_eats::models::common::VoteType;
use campus_eats::test_utils::dish_input;
use diesel::prelude::*;

#[actix_rt::test]
async fn upsert_creates_dish_with_open_period() {
    let Some((db, _fixtures)) = common::setup_pool_with_fixtures() else {
        return;
    };
    let dish_ops = DishOperations::new(db.pool.clone());

    let records = dish_ops
        .upsert_dishes(vec![dish_input("  Samosa ", 15.0, true, true)])
        .expect("upsert samosa");
    assert_eq!(records.len(), 1);
    let samosa = &records[0];
    assert_eq!(samosa.dish.dish_id, "samosa");
    assert_eq!(samosa.dish.name, "Samosa");
    assert_eq!(samosa.availability_history.len(), 1);
    assert!(samosa.availability_history[0].available_to.is_none());
}

#[actix_rt::test]
async fn unavailable_new_dish_gets_closed_zero_length_period() {
    let Some((db, fixtures)) = common::setup_pool_with_fixtures() else {
        return;
    };
    let dish_ops = DishOperations::new(db.pool.clone());

    let record = dish_ops
        .get_dish(&fixtures.unavailable_dish_id)
        .expect("cold coffee");
    assert!(!record.dish.is_available);
    assert_eq!(record.availability_history.len(), 1);
    let period = &record.availability_history[0];
    assert_eq!(period.available_to, Some(period.available_from));
}

#[actix_rt::test]
async fn toggling_availability_builds_history() {
    let Some((db, fixtures)) = common::setup_pool_with_fixtures() else {
        return;
    };
    let dish_ops = DishOperations::new(db.pool.clone());

    // available -> unavailable closes, unchanged flag is a no-op, available again reopens
    dish_ops
        .upsert_dishes(vec![dish_input("Masala Dosa", 60.0, true, false)])
        .expect("close");
    dish_ops
        .upsert_dishes(vec![dish_input("Masala Dosa", 65.0, true, false)])
        .expect("price change only");
    let record = dish_ops
        .upsert_dishes(vec![dish_input("Masala Dosa", 65.0, true, true)])
        .expect("reopen")
        .pop()
        .expect("record");

    assert_eq!(record.dish.dish_id, fixtures.available_dish_id);
    assert_eq!(record.dish.price, 65.0);
    let history = &record.availability_history;
    assert_eq!(history.len(), 2);
    assert!(history[0].available_to.is_some());
    assert!(history[1].available_to.is_none());
    assert!(history[0].period_id < history[1].period_id);
    assert!(history[1].available_from >= history[0].available_to.expect("closed"));
}

#[actix_rt::test]
async fn list_dishes_can_filter_available() {
    let Some((db, _fixtures)) = common::setup_pool_with_fixtures() else {
        return;
    };
    let dish_ops = DishOperations::new(db.pool.clone());

    let all = dish_ops.list_dishes(false).expect("list all");
    assert_eq!(all.len(), 2);
    let available = dish_ops.list_dishes(true).expect("list available");
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].dish.dish_id, "masala-dosa");
}

#[actix_rt::test]
async fn delete_dish_removes_votes_and_comments() {
    let Some((db, fixtures)) = common::setup_pool_with_fixtures() else {
        return;
    };
    let dish_ops = DishOperations::new(db.pool.clone());
    let vote_ops = VoteOperations::new(db.pool.clone());

    vote_ops
        .cast_vote(fixtures.user_id, &fixtures.available_dish_id, VoteType::Like)
        .expect("vote");
    vote_ops
        .add_feedback(
            fixtures.user_id,
            "User One",
            &fixtures.available_dish_id,
            "Crispy",
        )
        .expect("feedback");

    let removed = dish_ops
        .delete_dish(&fixtures.available_dish_id)
        .expect("delete");
    assert_eq!(removed.name, "Masala Dosa");

    let mut conn = DbConnection::new(&db.pool).expect("db connection");
    let votes: i64 = dish_user_votes::table
        .filter(dish_user_votes::dish_id.eq(&fixtures.available_dish_id))
        .count()
        .get_result(conn.connection())
        .expect("count votes");
    let tallies: i64 = vote_tallies::table
        .filter(vote_tallies::dish_id.eq(&fixtures.available_dish_id))
        .count()
        .get_result(conn.connection())
        .expect("count tallies");
    let comments: i64 = dish_comments::table
        .filter(dish_comments::dish_id.eq(&fixtures.available_dish_id))
        .count()
        .get_result(conn.connection())
        .expect("count comments");
    assert_eq!((votes, tallies, comments), (0, 0, 0));

    assert!(matches!(
        dish_ops.delete_dish(&fixtures.available_dish_id),
        Err(RepositoryError::NotFound(_))
    ));
}
