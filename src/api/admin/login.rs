use crate::auth::admin_jwt::issue_admin_jwt;
use crate::auth::AdminJwtConfig;
use crate::db::AdminOperations;
use crate::enums::admin::{AdminLoginRequest, AdminLoginResponse};
use crate::traits::Validate;
use actix_web::http::StatusCode;
use actix_web::{post, web, HttpResponse, Responder};

fn failure(status: StatusCode, msg: &str) -> HttpResponse {
    HttpResponse::build(status).json(AdminLoginResponse {
        success: false,
        token: None,
        error: Some(msg.to_string()),
    })
}

#[utoipa::path(
    tag = "Admin",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Credentials accepted, admin token issued", body = AdminLoginResponse),
        (status = 400, description = "Missing adminId or password", body = AdminLoginResponse),
        (status = 401, description = "Unknown admin or wrong password", body = AdminLoginResponse)
    ),
    summary = "Log in as a café admin"
)]
#[post("/admin-login")]
pub(crate) async fn admin_login(
    admin_ops: web::Data<AdminOperations>,
    jwt_cfg: web::Data<AdminJwtConfig>,
    req_data: web::Json<AdminLoginRequest>,
) -> actix_web::Result<impl Responder> {
    if let Err(msg) = req_data.validate() {
        return Ok(failure(StatusCode::BAD_REQUEST, &msg));
    }
    let AdminLoginRequest { admin_id, password } = req_data.into_inner();
    let admin_id = admin_id.trim().to_string();

    let login_id = admin_id.clone();
    let result = web::block(move || admin_ops.verify_login(&login_id, &password)).await?;

    match result {
        Ok(true) => match issue_admin_jwt(&admin_id, &jwt_cfg) {
            Ok(token) => {
                info!("admin_login: admin '{}' logged in", admin_id);
                Ok(HttpResponse::Ok().json(AdminLoginResponse {
                    success: true,
                    token: Some(token),
                    error: None,
                }))
            }
            Err(e) => {
                error!("admin_login: failed to issue token for '{}': {}", admin_id, e);
                Ok(failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Could not issue admin token",
                ))
            }
        },
        Ok(false) => {
            warn!("admin_login: rejected credentials for '{}'", admin_id);
            Ok(failure(
                StatusCode::UNAUTHORIZED,
                "Invalid admin credentials",
            ))
        }
        Err(e) => {
            error!("admin_login: lookup failed for '{}': {}", admin_id, e);
            Ok(failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
            ))
        }
    }
}
