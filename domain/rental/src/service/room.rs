use async_trait::async_trait;
use uuid::Uuid;

use crate::exception::RentalResult;
use crate::model::entity::Room;
use crate::model::vo::Caller;

#[async_trait]
pub trait RoomService: Send + Sync {
    /// The current tenant moves out and the room becomes vacant.
    async fn leave(&self, caller: Caller, room_id: Uuid) -> RentalResult<Room>;

    async fn occupied_rooms(&self, caller: Caller) -> RentalResult<Vec<Room>>;
}
