use actix_web::{get, post, web};
use domain_rental::model::entity::Room;

use super::{extract_uuid, ApiResponder, ApiResult};
use crate::infrastructure::{middleware::authorization::UserInfo, ServiceProvider};

#[post("room/LeaveRoom/{id}")]
#[tracing::instrument(skip(sp))]
pub async fn leave_room(
    sp: web::Data<ServiceProvider>,
    user: UserInfo,
    id: web::Path<String>,
) -> ApiResult<Room> {
    let id = extract_uuid(&id)?;
    Ok(ApiResponder(sp.room_service().leave(user.caller(), id).await?))
}

#[get("room/GetOccupiedRooms")]
pub async fn get_occupied_rooms(
    sp: web::Data<ServiceProvider>,
    user: UserInfo,
) -> ApiResult<Vec<Room>> {
    Ok(ApiResponder(sp.room_service().occupied_rooms(user.caller()).await?))
}
