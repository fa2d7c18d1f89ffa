use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database_model::rental::prelude::*;
use domain_rental::{
    model::entity::{Request, RequestStatus},
    repository::{ConditionNotMet, DBRepository, MutableRepository, ReadOnlyRepository, RequestRepo},
};
use sea_orm::{prelude::*, sea_query::Expr, ActiveValue, PaginatorTrait, QueryOrder, QueryTrait};

use crate::infrastructure::database::OrmRepo;

#[async_trait]
impl ReadOnlyRepository<Request> for OrmRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Request>> {
        RoomRequestEntity::find_by_id(id)
            .one(self.db.get_connection())
            .await?
            .map(Request::try_from)
            .transpose()
    }
}

#[async_trait]
impl MutableRepository<Request> for OrmRepo {
    async fn insert(&self, entity: &Request) -> anyhow::Result<Uuid> {
        let active_model: RoomRequestActiveModel = RoomRequestModel::from(entity.to_owned()).into();
        let stmt = RoomRequestEntity::insert(active_model.reset_all()).build(self.backend());
        self.stage(stmt).await;
        Ok(entity.id)
    }

    async fn update(&self, entity: &Request) -> anyhow::Result<()> {
        let active_model: RoomRequestActiveModel = RoomRequestModel::from(entity.to_owned()).into();
        let mut active_model = active_model.reset_all();
        active_model.created_time = ActiveValue::NotSet;
        let stmt = RoomRequestEntity::update(active_model).build(self.backend());
        self.stage(stmt).await;
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<()> {
        let stmt = RoomRequestEntity::delete_by_id(id).build(self.backend());
        self.stage(stmt).await;
        Ok(())
    }

    async fn save_changed(&self) -> anyhow::Result<bool> {
        self.save_changed().await
    }
}

impl DBRepository<Request> for OrmRepo {}

#[async_trait]
impl RequestRepo for OrmRepo {
    async fn get_by_tenant(&self, tenant_id: Uuid) -> anyhow::Result<Vec<Request>> {
        RoomRequestEntity::find()
            .filter(RoomRequestColumn::TenantId.eq(tenant_id))
            .order_by_desc(RoomRequestColumn::CreatedTime)
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(Request::try_from)
            .collect()
    }

    async fn get_by_landlord(&self, landlord_id: Uuid) -> anyhow::Result<Vec<Request>> {
        RoomRequestEntity::find()
            .filter(RoomRequestColumn::LandlordId.eq(landlord_id))
            .order_by_desc(RoomRequestColumn::CreatedTime)
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(Request::try_from)
            .collect()
    }

    async fn get_approved_visits(
        &self,
        tenant_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Request>> {
        RoomRequestEntity::find()
            .filter(RoomRequestColumn::TenantId.eq(tenant_id))
            .filter(RoomRequestColumn::Status.eq(RequestStatus::Approved as i32))
            .filter(RoomRequestColumn::VisitDate.gte(start))
            .filter(RoomRequestColumn::VisitDate.lt(end))
            .order_by_asc(RoomRequestColumn::VisitDate)
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(Request::try_from)
            .collect()
    }

    async fn count_new(&self, landlord_id: Uuid) -> anyhow::Result<u64> {
        Ok(RoomRequestEntity::find()
            .filter(RoomRequestColumn::LandlordId.eq(landlord_id))
            .filter(RoomRequestColumn::IsNew.eq(true))
            .count(self.db.get_connection())
            .await?)
    }

    async fn count_unread(&self, tenant_id: Uuid) -> anyhow::Result<u64> {
        Ok(RoomRequestEntity::find()
            .filter(RoomRequestColumn::TenantId.eq(tenant_id))
            .filter(RoomRequestColumn::IsRead.eq(false))
            .count(self.db.get_connection())
            .await?)
    }

    /// `UPDATE room_request ... WHERE id = ? AND status = ?`
    async fn update_from(&self, entity: &Request, expected: RequestStatus) -> anyhow::Result<()> {
        let stmt = RoomRequestEntity::update_many()
            .col_expr(RoomRequestColumn::Status, Expr::value(entity.status as i32))
            .col_expr(RoomRequestColumn::IsNew, Expr::value(entity.is_new))
            .col_expr(RoomRequestColumn::IsRead, Expr::value(entity.is_read))
            .filter(RoomRequestColumn::Id.eq(entity.id))
            .filter(RoomRequestColumn::Status.eq(expected as i32))
            .build(self.backend());
        self.stage_guarded(
            stmt,
            ConditionNotMet {
                entity: "request",
                id: entity.id,
            },
        )
        .await;
        Ok(())
    }

    async fn delete_from(&self, id: Uuid, expected: RequestStatus) -> anyhow::Result<()> {
        let stmt = RoomRequestEntity::delete_many()
            .filter(RoomRequestColumn::Id.eq(id))
            .filter(RoomRequestColumn::Status.eq(expected as i32))
            .build(self.backend());
        self.stage_guarded(
            stmt,
            ConditionNotMet {
                entity: "request",
                id,
            },
        )
        .await;
        Ok(())
    }
}
