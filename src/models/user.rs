use crate::models::common::OrderStatus;
use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Queryable, Selectable, Debug, Clone, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = crate::db::schema::users)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub user_id: i32,
    pub firebase_uid: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Serialize, Deserialize)]
#[diesel(table_name = crate::db::schema::users)]
pub struct NewUser {
    pub firebase_uid: String,
    pub email: String,
    pub name: String,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize, ToSchema)]
#[diesel(table_name = crate::db::schema::order_notifications)]
#[diesel(primary_key(notification_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct OrderNotification {
    pub notification_id: i32,
    pub user_id: i32,
    pub order_id: i32,
    pub status: OrderStatus,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::order_notifications)]
pub struct NewOrderNotification {
    pub user_id: i32,
    pub order_id: i32,
    pub status: OrderStatus,
    pub message: String,
}
