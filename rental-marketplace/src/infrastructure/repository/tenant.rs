use async_trait::async_trait;
use chrono::Utc;
use database_model::rental::prelude::*;
use domain_rental::repository::TenantRepo;
use sea_orm::{prelude::*, QueryTrait, Set};

use crate::infrastructure::database::OrmRepo;

/// 租客已入住房源列表，存于 `tenant_room`
#[async_trait]
impl TenantRepo for OrmRepo {
    async fn append_occupied_room(&self, tenant_id: Uuid, room_id: Uuid) -> anyhow::Result<()> {
        let stmt = TenantRoomEntity::insert(TenantRoomActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(tenant_id),
            room_id: Set(room_id),
            created_time: Set(Utc::now()),
        })
        .build(self.backend());
        self.stage(stmt).await;
        Ok(())
    }

    async fn remove_occupied_room(&self, tenant_id: Uuid, room_id: Uuid) -> anyhow::Result<()> {
        let stmt = TenantRoomEntity::delete_many()
            .filter(TenantRoomColumn::TenantId.eq(tenant_id))
            .filter(TenantRoomColumn::RoomId.eq(room_id))
            .build(self.backend());
        self.stage(stmt).await;
        Ok(())
    }
}
