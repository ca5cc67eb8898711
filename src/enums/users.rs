use crate::models::user::OrderNotification;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct NotificationsResponse {
    pub status: String,
    pub data: Vec<OrderNotification>,
    pub unread: usize,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct NotificationResponse {
    pub status: String,
    pub data: Option<OrderNotification>,
    pub error: Option<String>,
}
