use crate::db::RepositoryError;
use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{Error, HttpRequest, HttpResponse};
use serde_json::json;

pub fn default_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    error!("Error in request: {} \n Error: {}", req.full_url(), err);
    let body = json!({ "status": "error", "error": format!("Invalid request body: {err}") });
    actix_web::error::InternalError::from_response(err, HttpResponse::BadRequest().json(body))
        .into()
}

pub(crate) fn status_for(err: &RepositoryError) -> StatusCode {
    match err {
        RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
        RepositoryError::ValidationError(_) | RepositoryError::NotAvailable(_) => {
            StatusCode::BAD_REQUEST
        }
        RepositoryError::InvalidTransition(_) => StatusCode::CONFLICT,
        RepositoryError::DatabaseError(_) | RepositoryError::ConnectionPoolError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Store failures never leak their details to the client.
pub(crate) fn public_message(err: &RepositoryError) -> String {
    match err {
        RepositoryError::NotFound(what) => format!("Not found: {what}"),
        RepositoryError::ValidationError(msg)
        | RepositoryError::NotAvailable(msg)
        | RepositoryError::InvalidTransition(msg) => msg.clone(),
        RepositoryError::DatabaseError(_) | RepositoryError::ConnectionPoolError(_) => {
            "Internal server error".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_repository_errors_to_statuses() {
        assert_eq!(
            status_for(&RepositoryError::NotFound("dishes: x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&RepositoryError::NotAvailable("closed".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&RepositoryError::InvalidTransition("no".into())),
            StatusCode::CONFLICT
        );
        let db = RepositoryError::DatabaseError(diesel::result::Error::RollbackTransaction);
        assert_eq!(status_for(&db), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(public_message(&db), "Internal server error");
    }
}
