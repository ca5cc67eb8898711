use crate::api::errors::{public_message, status_for};
use crate::auth::UserPrincipal;
use crate::db::NotificationOperations;
use crate::enums::users::{NotificationResponse, NotificationsResponse};
use actix_web::{get, put, web, HttpResponse, Responder};

#[utoipa::path(
    tag = "Notifications",
    responses(
        (status = 200, description = "Order updates for the caller, newest first", body = NotificationsResponse)
    ),
    summary = "Order status notifications"
)]
#[get("")]
pub(crate) async fn list_notifications(
    user: UserPrincipal,
    notification_ops: web::Data<NotificationOperations>,
) -> actix_web::Result<impl Responder> {
    let uid = user.user_id();
    let result = web::block(move || notification_ops.list_for_user(uid)).await?;

    match result {
        Ok(data) => {
            let unread = data.iter().filter(|n| !n.is_read).count();
            Ok(HttpResponse::Ok().json(NotificationsResponse {
                status: "ok".to_string(),
                data,
                unread,
                error: None,
            }))
        }
        Err(e) => {
            error!("NOTIFICATIONS: list_notifications(): user {}: {}", uid, e);
            Ok(HttpResponse::build(status_for(&e)).json(NotificationsResponse {
                status: "error".to_string(),
                data: Vec::new(),
                unread: 0,
                error: Some(public_message(&e)),
            }))
        }
    }
}

#[utoipa::path(
    tag = "Notifications",
    params(
        ("id", description = "Notification to mark as read"),
    ),
    responses(
        (status = 200, description = "Notification marked read", body = NotificationResponse),
        (status = 404, description = "No such notification for the caller", body = NotificationResponse)
    ),
    summary = "Mark a notification as read"
)]
#[put("/{id}/read")]
pub(crate) async fn mark_notification_read(
    user: UserPrincipal,
    notification_ops: web::Data<NotificationOperations>,
    path: web::Path<(i32,)>,
) -> actix_web::Result<impl Responder> {
    let uid = user.user_id();
    let id = path.into_inner().0;
    let result = web::block(move || notification_ops.mark_read(uid, id)).await?;

    match result {
        Ok(notification) => Ok(HttpResponse::Ok().json(NotificationResponse {
            status: "ok".to_string(),
            data: Some(notification),
            error: None,
        })),
        Err(e) => {
            error!("NOTIFICATIONS: mark_notification_read(): {} for user {}: {}", id, uid, e);
            Ok(HttpResponse::build(status_for(&e)).json(NotificationResponse {
                status: "error".to_string(),
                data: None,
                error: Some(public_message(&e)),
            }))
        }
    }
}
