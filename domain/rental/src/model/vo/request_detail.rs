use serde::Serialize;
use uuid::Uuid;

use crate::model::entity::{Request, Room, RoomStatus};

/// Room fields shown alongside a request.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub id: Uuid,
    pub address: String,
    pub rent: i64,
    pub status: RoomStatus,
}

impl From<&Room> for RoomSummary {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id,
            address: room.address.to_owned(),
            rent: room.rent,
            status: room.status,
        }
    }
}

/// A request expanded with its counterpart party and room summary.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDetail {
    #[serde(flatten)]
    pub request: Request,
    /// The party on the other side from the caller.
    pub counterpart_id: Uuid,
    pub room: Option<RoomSummary>,
}
