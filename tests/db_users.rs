mod common;

use campus_eats::db::{
    AdminOperations, NotificationOperations, OrderOperations, RepositoryError, UserOperations,
};
use campus_eats::models::common::OrderStatus;
use campus_eats::test_utils::{test_pepper, TEST_ADMIN_ID, TEST_ADMIN_PASSWORD};

#[actix_rt::test]
async fn upsert_firebase_user_insert_and_update() {
    let Some((db, _fixtures)) = common::setup_pool_with_fixtures() else {
        return;
    };
    let user_ops = UserOperations::new(db.pool.clone());

    let user = user_ops
        .upsert_firebase_user(
            "firebase-uid-test".to_string(),
            Some("test@example.com".to_string()),
            Some("Test User".to_string()),
        )
        .expect("upsert insert should succeed");
    assert_eq!(user.email, "test@example.com");
    assert_eq!(user.name, "Test User");

    let updated_user = user_ops
        .upsert_firebase_user(
            "firebase-uid-test".to_string(),
            Some("updated@example.com".to_string()),
            Some("Updated User".to_string()),
        )
        .expect("upsert update should succeed");

    assert_eq!(updated_user.email, "updated@example.com");
    assert_eq!(updated_user.name, "Updated User");
    // same firebase_uid, same row
    assert_eq!(updated_user.user_id, user.user_id);
}

#[actix_rt::test]
async fn upsert_firebase_user_name_falls_back_to_email() {
    let Some((db, _fixtures)) = common::setup_pool_with_fixtures() else {
        return;
    };
    let user_ops = UserOperations::new(db.pool.clone());

    let user = user_ops
        .upsert_firebase_user(
            "firebase-uid-nameless".to_string(),
            Some("nameless@example.com".to_string()),
            Some("   ".to_string()),
        )
        .expect("upsert should succeed");
    assert_eq!(user.name, "nameless@example.com");
}

#[actix_rt::test]
async fn upsert_firebase_user_missing_email_errors() {
    let Some((db, _fixtures)) = common::setup_pool_with_fixtures() else {
        return;
    };
    let user_ops = UserOperations::new(db.pool.clone());

    let result = user_ops.upsert_firebase_user(
        "firebase-uid-no-email".to_string(),
        None,
        Some("Some User".to_string()),
    );
    assert!(matches!(result, Err(RepositoryError::ValidationError(_))));
}

#[actix_rt::test]
async fn get_user_unknown_id_is_not_found() {
    let Some((db, fixtures)) = common::setup_pool_with_fixtures() else {
        return;
    };
    let user_ops = UserOperations::new(db.pool.clone());

    let user = user_ops.get_user(fixtures.user_id).expect("fixture user");
    assert_eq!(user.email, "user1@example.com");
    let by_email = user_ops
        .get_user_by_email("user2@example.com")
        .expect("lookup by email");
    assert_eq!(by_email.user_id, fixtures.other_user_id);

    assert!(matches!(
        user_ops.get_user(9999),
        Err(RepositoryError::NotFound(_))
    ));
}

#[actix_rt::test]
async fn admin_login_checks_peppered_hash() {
    let Some((db, _fixtures)) = common::setup_pool_with_fixtures() else {
        return;
    };
    let admin_ops = AdminOperations::new(db.pool.clone(), test_pepper());

    assert!(admin_ops
        .verify_login(TEST_ADMIN_ID, TEST_ADMIN_PASSWORD)
        .expect("verify"));
    assert!(!admin_ops
        .verify_login(TEST_ADMIN_ID, "wrong-password")
        .expect("verify"));
    assert!(!admin_ops
        .verify_login("nobody", TEST_ADMIN_PASSWORD)
        .expect("verify"));

    let wrong_pepper = AdminOperations::new(db.pool.clone(), "other-pepper".to_string());
    assert!(!wrong_pepper
        .verify_login(TEST_ADMIN_ID, TEST_ADMIN_PASSWORD)
        .expect("verify"));
}

#[actix_rt::test]
async fn seed_admin_is_idempotent() {
    let Some((db, _fixtures)) = common::setup_pool_with_fixtures() else {
        return;
    };
    let admin_ops = AdminOperations::new(db.pool.clone(), test_pepper());

    assert!(admin_ops.seed_admin("night-shift", "pw-1").expect("seed"));
    // a second seed must not overwrite the stored password
    assert!(!admin_ops.seed_admin("night-shift", "pw-2").expect("seed"));
    assert!(admin_ops.verify_login("night-shift", "pw-1").expect("verify"));
    assert!(admin_ops.admin_exists("night-shift").expect("exists"));
}

#[actix_rt::test]
async fn notifications_are_owner_scoped() {
    let Some((db, fixtures)) = common::setup_pool_with_fixtures() else {
        return;
    };
    let order_ops = OrderOperations::new(db.pool.clone());
    let notification_ops = NotificationOperations::new(db.pool.clone());

    let order = order_ops
        .create_order(fixtures.user_id, &fixtures.available_dish_id, 1)
        .expect("create order");
    order_ops
        .update_status(order.order_id, OrderStatus::Accepted, None, None)
        .expect("accept");

    let mine = notification_ops
        .list_for_user(fixtures.user_id)
        .expect("list notifications");
    assert_eq!(mine.len(), 1);
    assert!(!mine[0].is_read);
    assert_eq!(mine[0].status, OrderStatus::Accepted);

    assert!(notification_ops
        .list_for_user(fixtures.other_user_id)
        .expect("list notifications")
        .is_empty());

    let err = notification_ops
        .mark_read(fixtures.other_user_id, mine[0].notification_id)
        .expect_err("other user cannot mark it");
    assert!(matches!(err, RepositoryError::NotFound(_)));

    let read = notification_ops
        .mark_read(fixtures.user_id, mine[0].notification_id)
        .expect("owner marks read");
    assert!(read.is_read);
}
