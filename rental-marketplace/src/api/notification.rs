use actix_web::{get, post, web};
use domain_rental::model::entity::{Notification, NotificationKind};

use super::{
    dtos::{CountDto, NotificationQuery},
    extract_uuid, ApiResponder, ApiResult,
};
use crate::infrastructure::{middleware::authorization::UserInfo, ServiceProvider};

#[get("notification/GetNotifications")]
pub async fn get_notifications(
    sp: web::Data<ServiceProvider>,
    user: UserInfo,
    query: web::Query<NotificationQuery>,
) -> ApiResult<Vec<Notification>> {
    let kind = query
        .into_inner()
        .kind
        .map(|kind| kind.parse::<NotificationKind>())
        .transpose()?;
    Ok(ApiResponder(sp.notification_service().list(user.caller(), kind).await?))
}

#[post("notification/MarkNotificationRead/{id}")]
pub async fn mark_notification_read(
    sp: web::Data<ServiceProvider>,
    user: UserInfo,
    id: web::Path<String>,
) -> ApiResult<()> {
    let id = extract_uuid(&id)?;
    sp.notification_service().mark_read(user.caller(), id).await?;
    Ok(ApiResponder(()))
}

#[post("notification/MarkAllNotificationsRead")]
pub async fn mark_all_notifications_read(
    sp: web::Data<ServiceProvider>,
    user: UserInfo,
) -> ApiResult<()> {
    sp.notification_service().mark_all_read(user.caller()).await?;
    Ok(ApiResponder(()))
}

#[get("notification/GetUnreadNotificationCount")]
pub async fn get_unread_notification_count(
    sp: web::Data<ServiceProvider>,
    user: UserInfo,
) -> ApiResult<CountDto> {
    let count = sp.notification_service().unread_count(user.caller()).await?;
    Ok(ApiResponder(CountDto { count }))
}

#[post("notification/DeleteNotification/{id}")]
#[tracing::instrument(skip(sp))]
pub async fn delete_notification(
    sp: web::Data<ServiceProvider>,
    user: UserInfo,
    id: web::Path<String>,
) -> ApiResult<()> {
    let id = extract_uuid(&id)?;
    sp.notification_service().delete(user.caller(), id).await?;
    Ok(ApiResponder(()))
}
