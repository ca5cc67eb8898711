use crate::models::admin::{dish_id_or_name, DishRecord};
use crate::models::common::{DishComment, Order, OrderStatus, VoteType};
use crate::traits::{require_max_len, require_non_blank, Validate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

pub const MAX_COMMENT_LEN: usize = 500;
pub const MAX_ORDER_QUANTITY: i32 = 20;

// ---------- MENU ---------- //

#[derive(Serialize, ToSchema)]
pub struct MenuResponse {
    pub status: String,
    pub items: Vec<DishRecord>,
    pub error: Option<String>,
}

// ---------- VOTES ---------- //

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    #[serde(default)]
    pub dish_id: Option<String>,
    /// Used to derive the id when `dishId` is absent.
    #[serde(default)]
    pub dish_name: Option<String>,
    pub vote: VoteType,
}

impl VoteRequest {
    pub fn normalized_id(&self) -> Option<String> {
        dish_id_or_name(self.dish_id.as_deref(), self.dish_name.as_deref())
    }
}

impl Validate for VoteRequest {
    fn validate(&self) -> Result<(), String> {
        match self.normalized_id() {
            Some(_) => Ok(()),
            None => Err("dishId or dishName is required".to_string()),
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub success: bool,
    pub likes: i32,
    pub dislikes: i32,
    /// The caller's vote after the toggle; absent when it was removed.
    pub user_vote: Option<VoteType>,
    pub error: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    #[serde(default)]
    pub dish_id: Option<String>,
    #[serde(default)]
    pub dish_name: Option<String>,
    pub comment: String,
}

impl FeedbackRequest {
    pub fn normalized_id(&self) -> Option<String> {
        dish_id_or_name(self.dish_id.as_deref(), self.dish_name.as_deref())
    }
}

impl Validate for FeedbackRequest {
    fn validate(&self) -> Result<(), String> {
        if self.normalized_id().is_none() {
            return Err("dishId or dishName is required".to_string());
        }
        require_non_blank("comment", &self.comment)?;
        require_max_len("comment", self.comment.trim(), MAX_COMMENT_LEN)
    }
}

#[derive(Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DishVoteSummary {
    pub dish_name: String,
    pub likes: i32,
    pub dislikes: i32,
    pub current_comments: Vec<DishComment>,
    pub past_comments: Vec<DishComment>,
}

#[derive(Serialize, ToSchema)]
pub struct DishVotesResponse {
    pub status: String,
    pub votes: BTreeMap<String, DishVoteSummary>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserVoteEntry {
    #[serde(rename = "type")]
    pub vote_type: VoteType,
    pub timestamp: DateTime<Utc>,
    pub period_id: i32,
    pub period_started_at: DateTime<Utc>,
    /// True when the vote belongs to the dish's open period and still counts.
    pub is_current: bool,
}

#[derive(Serialize, ToSchema)]
pub struct UserVotesResponse {
    pub status: String,
    pub votes: BTreeMap<String, UserVoteEntry>,
    pub error: Option<String>,
}

// ---------- ORDERS ---------- //

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub dish_id: String,
    pub quantity: i32,
}

impl Validate for CreateOrderRequest {
    fn validate(&self) -> Result<(), String> {
        require_non_blank("dishId", &self.dish_id)?;
        if !(1..=MAX_ORDER_QUANTITY).contains(&self.quantity) {
            return Err(format!(
                "quantity must be between 1 and {MAX_ORDER_QUANTITY}"
            ));
        }
        Ok(())
    }
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
    #[serde(default)]
    pub pickup_time: Option<String>,
    #[serde(default)]
    pub admin_notes: Option<String>,
}

impl Validate for UpdateOrderStatusRequest {
    fn validate(&self) -> Result<(), String> {
        if let Some(time) = &self.pickup_time {
            require_non_blank("pickupTime", time)?;
            require_max_len("pickupTime", time, 64)?;
            if self.status != OrderStatus::Ready {
                return Err("pickupTime can only be set when marking an order Ready".to_string());
            }
        }
        if let Some(notes) = &self.admin_notes {
            require_max_len("adminNotes", notes, MAX_COMMENT_LEN)?;
        }
        Ok(())
    }
}

#[derive(Deserialize, IntoParams)]
pub struct OrderStatusQuery {
    /// Only return orders in this status.
    pub status: Option<OrderStatus>,
}

#[derive(Serialize, ToSchema)]
pub struct OrderResponse {
    pub status: String,
    pub data: Option<Order>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct OrdersResponse {
    pub status: String,
    pub data: Vec<Order>,
    pub error: Option<String>,
}
