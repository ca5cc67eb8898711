use crate::db::schema::{dishes, order_notifications, orders, users};
use crate::db::{DbConnection, DbPool, RepositoryError};
use crate::models::admin::Dish;
use crate::models::common::{NewOrder, Order, OrderStatus};
use crate::models::user::NewOrderNotification;
use crate::services::order_flow::{check_transition, notification_message};
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::Error;
use log::{debug, error, info};

#[derive(Clone)]
pub struct OrderOperations {
    pool: DbPool,
}

impl OrderOperations {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Places a `Pending` order. Name and price are copied from the dish, which
    /// must currently be available.
    pub fn create_order(
        &self,
        owner_id: i32,
        target_dish_id: &str,
        order_quantity: i32,
    ) -> Result<Order, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_order: failed to acquire DB connection: {}", e);
            e
        })?;

        if order_quantity <= 0 {
            return Err(RepositoryError::ValidationError(format!(
                "Order quantity must be positive for user: {owner_id}"
            )));
        }

        conn.connection()
            .transaction(|conn| {
                let owner_email = users::table
                    .find(owner_id)
                    .select(users::email)
                    .first::<String>(conn)
                    .map_err(|e| match e {
                        Error::NotFound => RepositoryError::NotFound(format!("users: {owner_id}")),
                        other => RepositoryError::DatabaseError(other),
                    })?;

                let dish = dishes::table
                    .find(target_dish_id)
                    .select(Dish::as_select())
                    .first::<Dish>(conn)
                    .map_err(|e| match e {
                        Error::NotFound => {
                            RepositoryError::NotFound(format!("dishes: {target_dish_id}"))
                        }
                        other => RepositoryError::DatabaseError(other),
                    })?;

                if !dish.is_available {
                    return Err(RepositoryError::NotAvailable(format!(
                        "{} is not available right now",
                        dish.name
                    )));
                }

                let order = diesel::insert_into(orders::table)
                    .values(&NewOrder {
                        user_id: owner_id,
                        user_email: owner_email,
                        dish_id: Some(dish.dish_id.clone()),
                        item_name: dish.name.clone(),
                        price: dish.price,
                        quantity: order_quantity,
                        status: OrderStatus::Pending,
                    })
                    .returning(Order::as_returning())
                    .get_result::<Order>(conn)?;

                info!(
                    "create_order: order {} placed by user {} for {} x {}",
                    order.order_id, owner_id, order_quantity, dish.dish_id
                );
                Ok(order)
            })
            .map_err(|e: RepositoryError| {
                if let RepositoryError::DatabaseError(inner) = &e {
                    error!(
                        "create_order: error inserting order for user {}: {}",
                        owner_id, inner
                    );
                }
                e
            })
    }

    /// Newest first.
    pub fn orders_for_user(&self, owner_id: i32) -> Result<Vec<Order>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("orders_for_user: failed to acquire DB connection: {}", e);
            e
        })?;

        orders::table
            .filter(orders::user_id.eq(owner_id))
            .order((orders::ordered_at.desc(), orders::order_id.desc()))
            .select(Order::as_select())
            .load::<Order>(conn.connection())
            .map_err(|e| {
                error!(
                    "orders_for_user: error loading orders for user {}: {}",
                    owner_id, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn list_orders(&self, status_filter: Option<OrderStatus>) -> Result<Vec<Order>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_orders: failed to acquire DB connection: {}", e);
            e
        })?;

        let mut query = orders::table.select(Order::as_select()).into_boxed();
        if let Some(wanted) = status_filter {
            query = query.filter(orders::status.eq(wanted));
        }
        query
            .order((orders::ordered_at.desc(), orders::order_id.desc()))
            .load::<Order>(conn.connection())
            .map_err(|e| {
                error!("list_orders: error loading orders ({:?}): {}", status_filter, e);
                RepositoryError::DatabaseError(e)
            })
    }

    /// Moves an order along the workflow and queues a notification for its owner.
    pub fn update_status(
        &self,
        target_order_id: i32,
        next_status: OrderStatus,
        pickup: Option<String>,
        notes: Option<String>,
    ) -> Result<Order, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("update_status: failed to acquire DB connection: {}", e);
            e
        })?;

        conn.connection()
            .transaction(|conn| {
                let current = orders::table
                    .find(target_order_id)
                    .for_update()
                    .select(Order::as_select())
                    .first::<Order>(conn)
                    .map_err(|e| match e {
                        Error::NotFound => {
                            RepositoryError::NotFound(format!("orders: {target_order_id}"))
                        }
                        other => RepositoryError::DatabaseError(other),
                    })?;

                check_transition(current.status, next_status)?;

                let pickup_value = match next_status {
                    OrderStatus::Ready => pickup.or(current.pickup_time),
                    _ => current.pickup_time,
                };
                let notes_value = notes.or(current.admin_notes);

                let updated = diesel::update(orders::table.find(target_order_id))
                    .set((
                        orders::status.eq(next_status),
                        orders::pickup_time.eq(&pickup_value),
                        orders::admin_notes.eq(&notes_value),
                        orders::updated_at.eq(Utc::now()),
                    ))
                    .returning(Order::as_returning())
                    .get_result::<Order>(conn)?;

                diesel::insert_into(order_notifications::table)
                    .values(&NewOrderNotification {
                        user_id: updated.user_id,
                        order_id: updated.order_id,
                        status: next_status,
                        message: notification_message(
                            &updated.item_name,
                            updated.quantity,
                            next_status,
                            updated.pickup_time.as_deref(),
                        ),
                    })
                    .execute(conn)?;

                debug!(
                    "update_status: order {} moved {} -> {}",
                    target_order_id, current.status, next_status
                );
                Ok(updated)
            })
            .map_err(|e: RepositoryError| {
                if let RepositoryError::DatabaseError(inner) = &e {
                    error!(
                        "update_status: error updating order {}: {}",
                        target_order_id, inner
                    );
                }
                e
            })
    }
}
