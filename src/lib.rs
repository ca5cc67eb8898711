#[macro_use]
extern crate log;

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod enums;
pub mod models;
pub mod services;
pub mod test_utils;
pub mod traits;

use crate::auth::AdminJwtConfig;
use crate::db::{
    AdminOperations, DbPool, DishOperations, MessOperations, NotificationOperations,
    OrderOperations, UserOperations, VoteOperations,
};
use crate::models::mess::Quote;
use chrono::FixedOffset;

#[derive(Clone)]
pub struct AppState {
    pub user_ops: UserOperations,
    pub admin_ops: AdminOperations,
    pub dish_ops: DishOperations,
    pub vote_ops: VoteOperations,
    pub order_ops: OrderOperations,
    pub notification_ops: NotificationOperations,
    pub mess_ops: MessOperations,
    pub admin_jwt_cfg: AdminJwtConfig,
}

impl AppState {
    pub fn new(
        db: DbPool,
        pepper: String,
        quotes: Vec<Quote>,
        tz: FixedOffset,
        admin_jwt_cfg: AdminJwtConfig,
    ) -> Self {
        AppState {
            user_ops: UserOperations::new(db.clone()),
            admin_ops: AdminOperations::new(db.clone(), pepper),
            dish_ops: DishOperations::new(db.clone()),
            vote_ops: VoteOperations::new(db.clone()),
            order_ops: OrderOperations::new(db.clone()),
            notification_ops: NotificationOperations::new(db.clone()),
            mess_ops: MessOperations::new(db, quotes, tz),
            admin_jwt_cfg,
        }
    }
}
