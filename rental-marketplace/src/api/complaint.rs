use actix_web::{get, post, web};
use domain_rental::{
    exception::RentalException,
    model::entity::{Complaint, ComplaintStatus},
};

use super::{
    dtos::{CreateComplaintDto, SetComplaintStatusDto},
    extract_uuid, ApiResponder, ApiResult,
};
use crate::infrastructure::{middleware::authorization::UserInfo, ServiceProvider};

#[post("complaint/CreateComplaint")]
#[tracing::instrument(skip(sp))]
pub async fn create_complaint(
    sp: web::Data<ServiceProvider>,
    user: UserInfo,
    body: web::Json<CreateComplaintDto>,
) -> ApiResult<Complaint> {
    let complaint = sp.complaint_service().create(user.caller(), body.into_inner().into()).await?;
    Ok(ApiResponder(complaint))
}

#[get("complaint/GetComplaints")]
pub async fn get_complaints(
    sp: web::Data<ServiceProvider>,
    user: UserInfo,
) -> ApiResult<Vec<Complaint>> {
    Ok(ApiResponder(sp.complaint_service().list(user.caller()).await?))
}

#[post("complaint/SetComplaintStatus")]
#[tracing::instrument(skip(sp))]
pub async fn set_complaint_status(
    sp: web::Data<ServiceProvider>,
    user: UserInfo,
    body: web::Json<SetComplaintStatusDto>,
) -> ApiResult<Complaint> {
    let SetComplaintStatusDto {
        complaint_id,
        status,
    } = body.into_inner();
    let complaint_id = complaint_id.ok_or(RentalException::MissingField {
        field: "complaintId",
    })?;
    let status = status.parse::<ComplaintStatus>()?;
    let complaint = sp.complaint_service().set_status(user.caller(), complaint_id, status).await?;
    Ok(ApiResponder(complaint))
}

/// Tenant or landlord hide, depending on who calls.
#[post("complaint/HideComplaint/{id}")]
#[tracing::instrument(skip(sp))]
pub async fn hide_complaint(
    sp: web::Data<ServiceProvider>,
    user: UserInfo,
    id: web::Path<String>,
) -> ApiResult<Complaint> {
    let id = extract_uuid(&id)?;
    Ok(ApiResponder(sp.complaint_service().hide(user.caller(), id).await?))
}
