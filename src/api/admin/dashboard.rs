use crate::api::errors::{public_message, status_for};
use crate::auth::AdminPrincipal;
use crate::db::DishOperations;
use crate::enums::admin::{
    DeleteDishRequest, DishListResponse, GeneralResponse, UpsertDishesRequest, UpsertDishesResponse,
};
use crate::traits::Validate;
use actix_web::{delete, get, post, web, HttpResponse, Responder};

#[utoipa::path(
    tag = "Admin",
    responses(
        (status = 200, description = "Every dish with its full availability history", body = DishListResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    ),
    summary = "List all dishes for the admin dashboard"
)]
#[get("/admin-dashboard")]
pub(crate) async fn list_dishes(
    admin: AdminPrincipal,
    dish_ops: web::Data<DishOperations>,
) -> actix_web::Result<impl Responder> {
    let result = web::block(move || dish_ops.list_dishes(false)).await?;

    match result {
        Ok(items) => {
            debug!("list_dishes: {} dishes for admin {}", items.len(), admin.admin_id);
            Ok(HttpResponse::Ok().json(DishListResponse {
                status: "ok".to_string(),
                items,
                error: None,
            }))
        }
        Err(e) => {
            error!("ADMIN: list_dishes(): {}", e);
            Ok(HttpResponse::build(status_for(&e)).json(DishListResponse {
                status: "error".to_string(),
                items: Vec::new(),
                error: Some(public_message(&e)),
            }))
        }
    }
}

#[utoipa::path(
    tag = "Admin",
    request_body = UpsertDishesRequest,
    responses(
        (status = 200, description = "Dishes created or updated", body = UpsertDishesResponse),
        (status = 400, description = "Invalid dish list", body = UpsertDishesResponse),
        (status = 500, description = "Store failure; nothing was written", body = UpsertDishesResponse)
    ),
    summary = "Bulk create or update dishes"
)]
#[post("/admin-dashboard")]
pub(crate) async fn upsert_dishes(
    admin: AdminPrincipal,
    dish_ops: web::Data<DishOperations>,
    req_data: web::Json<UpsertDishesRequest>,
) -> actix_web::Result<impl Responder> {
    if let Err(msg) = req_data.validate() {
        return Ok(HttpResponse::BadRequest().json(UpsertDishesResponse {
            status: "error".to_string(),
            data: Vec::new(),
            error: Some(msg),
        }));
    }

    let items = req_data.into_inner().items;
    let count = items.len();
    let result = web::block(move || dish_ops.upsert_dishes(items)).await?;

    match result {
        Ok(data) => {
            info!("upsert_dishes: admin {} saved {} dishes", admin.admin_id, count);
            Ok(HttpResponse::Ok().json(UpsertDishesResponse {
                status: "ok".to_string(),
                data,
                error: None,
            }))
        }
        Err(e) => {
            error!("ADMIN: upsert_dishes(): {}", e);
            Ok(HttpResponse::build(status_for(&e)).json(UpsertDishesResponse {
                status: "error".to_string(),
                data: Vec::new(),
                error: Some(public_message(&e)),
            }))
        }
    }
}

#[utoipa::path(
    tag = "Admin",
    request_body = DeleteDishRequest,
    responses(
        (status = 200, description = "Dish and all of its votes, comments and periods removed", body = GeneralResponse),
        (status = 400, description = "Neither dishId nor dishName given", body = GeneralResponse),
        (status = 404, description = "No such dish", body = GeneralResponse)
    ),
    summary = "Delete a dish"
)]
#[delete("/admin-dashboard")]
pub(crate) async fn delete_dish(
    admin: AdminPrincipal,
    dish_ops: web::Data<DishOperations>,
    req_data: web::Json<DeleteDishRequest>,
) -> actix_web::Result<impl Responder> {
    let Some(target) = req_data.normalized_id() else {
        let msg = req_data
            .validate()
            .err()
            .unwrap_or_else(|| "dishId or dishName is required".to_string());
        return Ok(HttpResponse::BadRequest().json(GeneralResponse {
            status: "error".to_string(),
            error: Some(msg),
        }));
    };

    let result = web::block(move || dish_ops.delete_dish(&target)).await?;

    match result {
        Ok(dish) => {
            info!("delete_dish: admin {} removed {}", admin.admin_id, dish.dish_id);
            Ok(HttpResponse::Ok().json(GeneralResponse {
                status: "ok".to_string(),
                error: None,
            }))
        }
        Err(e) => {
            error!("ADMIN: delete_dish(): {}", e);
            Ok(HttpResponse::build(status_for(&e)).json(GeneralResponse {
                status: "error".to_string(),
                error: Some(public_message(&e)),
            }))
        }
    }
}
