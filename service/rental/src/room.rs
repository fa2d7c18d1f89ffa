use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use domain_rental::{
    exception::{RentalException, RentalResult},
    model::{
        entity::{Notification, NotificationKind, NotificationStatus, Room, RoomStatus},
        vo::{Caller, Role},
    },
    repository::{ConditionNotMet, NotificationRepo, RoomRepo, TenantRepo},
    service::RoomService,
};
use uuid::Uuid;

#[derive(typed_builder::TypedBuilder)]
pub struct RoomServiceImpl {
    room_repo: Arc<dyn RoomRepo>,
    tenant_repo: Arc<dyn TenantRepo>,
    notification_repo: Arc<dyn NotificationRepo>,
}

#[async_trait]
impl RoomService for RoomServiceImpl {
    #[tracing::instrument(skip(self))]
    async fn leave(&self, caller: Caller, room_id: Uuid) -> RentalResult<Room> {
        caller.require_role(Role::Tenant, "leave room")?;
        let mut room = self
            .room_repo
            .get_by_id(room_id)
            .await?
            .ok_or(RentalException::RoomNotFound { id: room_id })?;
        if !room.is_occupied_by(caller.id) {
            return Err(RentalException::Forbidden {
                caller: caller.id,
                operation: "leave room".to_owned(),
            });
        }

        let now = Utc::now();
        let notification = Notification::new(
            caller.id,
            room.landlord_id,
            Role::Landlord,
            NotificationKind::RoomStatus,
            NotificationStatus::TenantLeave,
            None,
            now,
        )
        .with_room(room_id);
        self.room_repo.release_occupancy(room_id, caller.id).await?;
        self.tenant_repo.remove_occupied_room(caller.id, room_id).await?;
        self.notification_repo.insert(&notification).await?;
        self.notification_repo.save_changed().await.map_err(|e| {
            if e.downcast_ref::<ConditionNotMet>().is_some() {
                RentalException::RoomNotOccupiedBy {
                    room_id,
                    tenant_id: caller.id,
                }
            } else {
                e.into()
            }
        })?;

        room.tenant_id = None;
        room.joining_date = None;
        room.status = RoomStatus::Vacant;
        room.is_active = false;
        tracing::info!(%room_id, tenant_id = %caller.id, "tenant left room");
        Ok(room)
    }

    async fn occupied_rooms(&self, caller: Caller) -> RentalResult<Vec<Room>> {
        caller.require_role(Role::Tenant, "list occupied rooms")?;
        Ok(self.room_repo.get_by_tenant(caller.id).await?)
    }
}
