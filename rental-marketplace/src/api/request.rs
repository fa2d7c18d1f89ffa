use actix_web::{get, post, web};
use domain_rental::{
    exception::RentalException,
    model::{
        entity::{Request, RequestAction},
        vo::RequestDetail,
    },
};

use super::{
    dtos::{CountDto, CreateRequestDto, TransitionRequestDto},
    extract_uuid, ApiResponder, ApiResult,
};
use crate::infrastructure::{middleware::authorization::UserInfo, ServiceProvider};

#[post("request/CreateRequest")]
#[tracing::instrument(skip(sp))]
pub async fn create_request(
    sp: web::Data<ServiceProvider>,
    user: UserInfo,
    body: web::Json<CreateRequestDto>,
) -> ApiResult<Request> {
    let request = sp.request_service().create(user.caller(), body.into_inner().into()).await?;
    Ok(ApiResponder(request))
}

#[get("request/GetRequests")]
pub async fn get_requests(
    sp: web::Data<ServiceProvider>,
    user: UserInfo,
) -> ApiResult<Vec<RequestDetail>> {
    Ok(ApiResponder(sp.request_service().list(user.caller()).await?))
}

/// Applies a lifecycle action. A tenant cancellation answers with `null`.
#[post("request/TransitionRequest")]
#[tracing::instrument(skip(sp))]
pub async fn transition_request(
    sp: web::Data<ServiceProvider>,
    user: UserInfo,
    body: web::Json<TransitionRequestDto>,
) -> ApiResult<Option<Request>> {
    let TransitionRequestDto { request_id, action } = body.into_inner();
    let request_id = request_id.ok_or(RentalException::MissingField { field: "requestId" })?;
    let action = action.parse::<RequestAction>()?;
    let request = sp.request_service().transition(user.caller(), request_id, action).await?;
    Ok(ApiResponder(request))
}

#[get("request/GetVisitableRequests")]
pub async fn get_visitable_requests(
    sp: web::Data<ServiceProvider>,
    user: UserInfo,
) -> ApiResult<Vec<RequestDetail>> {
    Ok(ApiResponder(sp.request_service().visitable_today(user.caller()).await?))
}

#[post("request/MarkRequestRead/{id}")]
pub async fn mark_request_read(
    sp: web::Data<ServiceProvider>,
    user: UserInfo,
    id: web::Path<String>,
) -> ApiResult<()> {
    let id = extract_uuid(&id)?;
    sp.request_service().mark_read(user.caller(), id).await?;
    Ok(ApiResponder(()))
}

#[get("request/GetUnreadRequestCount")]
pub async fn get_unread_request_count(
    sp: web::Data<ServiceProvider>,
    user: UserInfo,
) -> ApiResult<CountDto> {
    let count = sp.request_service().unread_count(user.caller()).await?;
    Ok(ApiResponder(CountDto { count }))
}
