use crate::api::errors::{public_message, status_for};
use crate::auth::{AdminPrincipal, UserPrincipal};
use crate::db::OrderOperations;
use crate::enums::common::{
    CreateOrderRequest, OrderResponse, OrderStatusQuery, OrdersResponse, UpdateOrderStatusRequest,
};
use crate::models::admin::normalize_dish_id;
use crate::traits::Validate;
use actix_web::http::StatusCode;
use actix_web::{get, post, put, web, HttpResponse, Responder};

fn order_error(status: StatusCode, msg: String) -> HttpResponse {
    HttpResponse::build(status).json(OrderResponse {
        status: "error".to_string(),
        data: None,
        error: Some(msg),
    })
}

fn orders_error(status: StatusCode, msg: String) -> HttpResponse {
    HttpResponse::build(status).json(OrdersResponse {
        status: "error".to_string(),
        data: Vec::new(),
        error: Some(msg),
    })
}

#[utoipa::path(
    tag = "Orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order placed as Pending", body = OrderResponse),
        (status = 400, description = "Invalid quantity or dish unavailable", body = OrderResponse),
        (status = 404, description = "No such dish", body = OrderResponse)
    ),
    summary = "Place a café pre-order"
)]
#[post("")]
pub(crate) async fn create_order(
    user: UserPrincipal,
    order_ops: web::Data<OrderOperations>,
    req_data: web::Json<CreateOrderRequest>,
) -> actix_web::Result<impl Responder> {
    if let Err(msg) = req_data.validate() {
        return Ok(order_error(StatusCode::BAD_REQUEST, msg));
    }

    let CreateOrderRequest { dish_id, quantity } = req_data.into_inner();
    let dish = normalize_dish_id(&dish_id);
    let uid = user.user_id();
    let result = web::block(move || order_ops.create_order(uid, &dish, quantity)).await?;

    match result {
        Ok(order) => Ok(HttpResponse::Ok().json(OrderResponse {
            status: "ok".to_string(),
            data: Some(order),
            error: None,
        })),
        Err(e) => {
            error!("ORDER: create_order(): user {}: {}", uid, e);
            Ok(order_error(status_for(&e), public_message(&e)))
        }
    }
}

#[utoipa::path(
    tag = "Orders",
    responses(
        (status = 200, description = "The caller's orders, newest first", body = OrdersResponse)
    ),
    summary = "Orders placed by the caller"
)]
#[get("/mine")]
pub(crate) async fn my_orders(
    user: UserPrincipal,
    order_ops: web::Data<OrderOperations>,
) -> actix_web::Result<impl Responder> {
    let uid = user.user_id();
    let result = web::block(move || order_ops.orders_for_user(uid)).await?;

    match result {
        Ok(data) => Ok(HttpResponse::Ok().json(OrdersResponse {
            status: "ok".to_string(),
            data,
            error: None,
        })),
        Err(e) => {
            error!("ORDER: my_orders(): user {}: {}", uid, e);
            Ok(orders_error(status_for(&e), public_message(&e)))
        }
    }
}

#[utoipa::path(
    tag = "Orders",
    params(OrderStatusQuery),
    responses(
        (status = 200, description = "All orders, optionally filtered by status", body = OrdersResponse),
        (status = 403, description = "Caller is not an admin")
    ),
    summary = "Admin order queue"
)]
#[get("")]
pub(crate) async fn list_orders(
    _admin: AdminPrincipal,
    order_ops: web::Data<OrderOperations>,
    query: web::Query<OrderStatusQuery>,
) -> actix_web::Result<impl Responder> {
    let wanted = query.into_inner().status;
    let result = web::block(move || order_ops.list_orders(wanted)).await?;

    match result {
        Ok(data) => Ok(HttpResponse::Ok().json(OrdersResponse {
            status: "ok".to_string(),
            data,
            error: None,
        })),
        Err(e) => {
            error!("ORDER: list_orders(): {}", e);
            Ok(orders_error(status_for(&e), public_message(&e)))
        }
    }
}

#[utoipa::path(
    tag = "Orders",
    params(
        ("id", description = "Order to move"),
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order moved; owner notified", body = OrderResponse),
        (status = 400, description = "Invalid body", body = OrderResponse),
        (status = 404, description = "No such order", body = OrderResponse),
        (status = 409, description = "Transition not allowed from the current status", body = OrderResponse)
    ),
    summary = "Move an order through Pending → Accepted → Ready → Collected (or Rejected)"
)]
#[put("/{id}/status")]
pub(crate) async fn update_order_status(
    admin: AdminPrincipal,
    order_ops: web::Data<OrderOperations>,
    path: web::Path<(i32,)>,
    req_data: web::Json<UpdateOrderStatusRequest>,
) -> actix_web::Result<impl Responder> {
    if let Err(msg) = req_data.validate() {
        return Ok(order_error(StatusCode::BAD_REQUEST, msg));
    }

    let order_id = path.into_inner().0;
    let UpdateOrderStatusRequest {
        status,
        pickup_time,
        admin_notes,
    } = req_data.into_inner();
    let result = web::block(move || {
        order_ops.update_status(order_id, status, pickup_time, admin_notes)
    })
    .await?;

    match result {
        Ok(order) => {
            info!(
                "update_order_status: admin {} moved order {} to {}",
                admin.admin_id, order_id, order.status
            );
            Ok(HttpResponse::Ok().json(OrderResponse {
                status: "ok".to_string(),
                data: Some(order),
                error: None,
            }))
        }
        Err(e) => {
            error!("ORDER: update_order_status(): order {}: {}", order_id, e);
            Ok(order_error(status_for(&e), public_message(&e)))
        }
    }
}
