mod admin;
mod common;
mod errors;
mod mess;
mod users;

use crate::AppState;
use actix_web::guard::{Guard, GuardContext};
use actix_web::http::header;
use actix_web::middleware::NormalizePath;
use actix_web::{get, web, HttpResponse, Responder};
pub use errors::default_error_handler;
use utoipa_actix_web::{scope, service_config::ServiceConfig};

/// Matches `application/json` bodies, with or without parameters such as charset.
pub struct ContentTypeHeader;

impl Guard for ContentTypeHeader {
    fn check(&self, ctx: &GuardContext<'_>) -> bool {
        ctx.head()
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
            .unwrap_or(false)
    }
}

#[utoipa::path(
    tag = "Health",
    responses((status = 200, description = "Server is running", body = String))
)]
#[get("/")]
async fn root_endpoint() -> impl Responder {
    HttpResponse::Ok().body("Server up!")
}

#[utoipa::path(
    tag = "Health",
    responses((status = 200, description = "Liveness probe", body = String))
)]
#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

/// Serves the document assembled by `utoipa-actix-web` from every registered route.
pub async fn openapi_json(api: web::Data<utoipa::openapi::OpenApi>) -> impl Responder {
    HttpResponse::Ok().json(api.get_ref())
}

/// Registers every route. Read-only root routes go first so that the
/// JSON-guarded catch-all scope registered last never shadows them.
pub fn configure(cfg: &mut ServiceConfig, state: &AppState) {
    cfg.app_data(web::Data::new(state.admin_ops.clone()))
        .app_data(web::Data::new(state.dish_ops.clone()))
        .app_data(web::Data::new(state.vote_ops.clone()))
        .app_data(web::Data::new(state.user_ops.clone()))
        .app_data(web::Data::new(state.admin_jwt_cfg.clone()))
        .service(root_endpoint)
        .service(health)
        .service(
            scope::scope("/mess")
                .wrap(NormalizePath::trim())
                .app_data(web::Data::new(state.mess_ops.clone()))
                .service(mess::mess_menu)
                .service(mess::mess_user_votes)
                .service(mess::leaderboard)
                .service(mess::daily_quote)
                .service(
                    scope::scope("")
                        .guard(ContentTypeHeader)
                        .service(mess::mess_vote),
                ),
        )
        .service(
            scope::scope("/orders")
                .wrap(NormalizePath::trim())
                .app_data(web::Data::new(state.order_ops.clone()))
                .service(common::my_orders)
                .service(common::list_orders)
                .service(
                    scope::scope("")
                        .guard(ContentTypeHeader)
                        .service(common::create_order)
                        .service(common::update_order_status),
                ),
        )
        .service(
            scope::scope("/notifications")
                .wrap(NormalizePath::trim())
                .app_data(web::Data::new(state.notification_ops.clone()))
                .service(users::list_notifications)
                .service(users::mark_notification_read),
        )
        .service(admin::list_dishes)
        .service(common::get_menu)
        .service(common::dish_votes)
        .service(common::user_votes)
        .service(
            scope::scope("")
                .guard(ContentTypeHeader)
                .service(admin::admin_login)
                .service(admin::upsert_dishes)
                .service(admin::delete_dish)
                .service(common::cast_vote)
                .service(common::submit_feedback),
        );
}
