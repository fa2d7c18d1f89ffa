use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database_model::rental::prelude::*;
use domain_rental::{
    model::entity::{Room, RoomStatus},
    repository::{ConditionNotMet, ReadOnlyRepository, RoomRepo},
};
use sea_orm::{prelude::*, sea_query::Expr, QueryTrait};

use crate::infrastructure::database::OrmRepo;

#[async_trait]
impl ReadOnlyRepository<Room> for OrmRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Room>> {
        RoomEntity::find_by_id(id)
            .one(self.db.get_connection())
            .await?
            .map(Room::try_from)
            .transpose()
    }
}

#[async_trait]
impl RoomRepo for OrmRepo {
    async fn get_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Room>> {
        RoomEntity::find()
            .filter(RoomColumn::Id.is_in(ids.iter().copied()))
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(Room::try_from)
            .collect()
    }

    async fn get_by_tenant(&self, tenant_id: Uuid) -> anyhow::Result<Vec<Room>> {
        RoomEntity::find()
            .filter(RoomColumn::TenantId.eq(tenant_id))
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(Room::try_from)
            .collect()
    }

    /// `UPDATE room ... WHERE id = ? AND tenant_id IS NULL`
    async fn claim_occupancy(
        &self,
        room_id: Uuid,
        tenant_id: Uuid,
        joining_date: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let stmt = RoomEntity::update_many()
            .col_expr(RoomColumn::TenantId, Expr::value(Some(tenant_id)))
            .col_expr(RoomColumn::JoiningDate, Expr::value(Some(joining_date)))
            .col_expr(RoomColumn::Status, Expr::value(RoomStatus::Occupied as i32))
            .col_expr(RoomColumn::IsActive, Expr::value(true))
            .filter(RoomColumn::Id.eq(room_id))
            .filter(RoomColumn::TenantId.is_null())
            .build(self.backend());
        self.stage_guarded(
            stmt,
            ConditionNotMet {
                entity: "room",
                id: room_id,
            },
        )
        .await;
        Ok(())
    }

    async fn release_occupancy(&self, room_id: Uuid, tenant_id: Uuid) -> anyhow::Result<()> {
        let stmt = RoomEntity::update_many()
            .col_expr(RoomColumn::TenantId, Expr::value(Option::<Uuid>::None))
            .col_expr(RoomColumn::JoiningDate, Expr::value(Option::<DateTime<Utc>>::None))
            .col_expr(RoomColumn::Status, Expr::value(RoomStatus::Vacant as i32))
            .col_expr(RoomColumn::IsActive, Expr::value(false))
            .filter(RoomColumn::Id.eq(room_id))
            .filter(RoomColumn::TenantId.eq(tenant_id))
            .build(self.backend());
        self.stage_guarded(
            stmt,
            ConditionNotMet {
                entity: "room",
                id: room_id,
            },
        )
        .await;
        Ok(())
    }
}
