use crate::db::errors::RepositoryError;
use crate::db::schema::order_notifications::dsl::*;
use crate::db::{DbConnection, DbPool};
use crate::models::user::OrderNotification;
use diesel::prelude::*;
use log::error;

#[derive(Clone)]
pub struct NotificationOperations {
    pool: DbPool,
}

impl NotificationOperations {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Newest first.
    pub fn list_for_user(&self, owner_id: i32) -> Result<Vec<OrderNotification>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_for_user: failed to acquire DB connection: {}", e);
            e
        })?;

        order_notifications
            .filter(user_id.eq(owner_id))
            .order((created_at.desc(), notification_id.desc()))
            .select(OrderNotification::as_select())
            .load::<OrderNotification>(conn.connection())
            .map_err(|e| {
                error!(
                    "list_for_user: error loading notifications for user {}: {}",
                    owner_id, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    /// Only the owner can mark a notification; other users get `NotFound`.
    pub fn mark_read(
        &self,
        owner_id: i32,
        target_id: i32,
    ) -> Result<OrderNotification, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("mark_read: failed to acquire DB connection: {}", e);
            e
        })?;

        diesel::update(
            order_notifications
                .filter(notification_id.eq(target_id))
                .filter(user_id.eq(owner_id)),
        )
        .set(is_read.eq(true))
        .returning(OrderNotification::as_returning())
        .get_result::<OrderNotification>(conn.connection())
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                RepositoryError::NotFound(format!("order_notifications: {target_id}"))
            }
            other => {
                error!("mark_read: error updating notification {}: {}", target_id, other);
                RepositoryError::DatabaseError(other)
            }
        })
    }
}
