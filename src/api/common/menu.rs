use crate::api::errors::{public_message, status_for};
use crate::db::DishOperations;
use crate::enums::common::MenuResponse;
use actix_web::{get, web, HttpResponse, Responder};

#[utoipa::path(
    tag = "Menu",
    responses(
        (status = 200, description = "Dishes that are currently available", body = MenuResponse)
    ),
    summary = "Public café menu"
)]
#[get("/menu")]
pub(crate) async fn get_menu(dish_ops: web::Data<DishOperations>) -> actix_web::Result<impl Responder> {
    let result = web::block(move || dish_ops.list_dishes(true)).await?;

    match result {
        Ok(items) => Ok(HttpResponse::Ok().json(MenuResponse {
            status: "ok".to_string(),
            items,
            error: None,
        })),
        Err(e) => {
            error!("MENU: get_menu(): {}", e);
            Ok(HttpResponse::build(status_for(&e)).json(MenuResponse {
                status: "error".to_string(),
                items: Vec::new(),
                error: Some(public_message(&e)),
            }))
        }
    }
}
