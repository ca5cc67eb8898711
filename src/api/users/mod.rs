mod notifications;

pub(super) use notifications::{list_notifications, mark_notification_read};
