use async_trait::async_trait;
use database_model::rental::prelude::*;
use domain_rental::{
    model::entity::Complaint,
    repository::{ComplaintRepo, DBRepository, MutableRepository, ReadOnlyRepository},
};
use sea_orm::{prelude::*, ActiveValue, QueryOrder, QueryTrait};

use crate::infrastructure::database::OrmRepo;

#[async_trait]
impl ReadOnlyRepository<Complaint> for OrmRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Complaint>> {
        ComplaintEntity::find_by_id(id)
            .one(self.db.get_connection())
            .await?
            .map(Complaint::try_from)
            .transpose()
    }
}

#[async_trait]
impl MutableRepository<Complaint> for OrmRepo {
    async fn insert(&self, entity: &Complaint) -> anyhow::Result<Uuid> {
        let active_model: ComplaintActiveModel = ComplaintModel::from(entity.to_owned()).into();
        let stmt = ComplaintEntity::insert(active_model.reset_all()).build(self.backend());
        self.stage(stmt).await;
        Ok(entity.id)
    }

    async fn update(&self, entity: &Complaint) -> anyhow::Result<()> {
        let stmt = ComplaintEntity::update(ComplaintActiveModel {
            id: ActiveValue::Unchanged(entity.id),
            status: ActiveValue::Set(entity.status as i32),
            hidden_by_tenant: ActiveValue::Set(entity.hidden_by_tenant),
            hidden_by_landlord: ActiveValue::Set(entity.hidden_by_landlord),
            last_modified_time: ActiveValue::Set(entity.last_modified_time),
            ..Default::default()
        })
        .build(self.backend());
        self.stage(stmt).await;
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<()> {
        let stmt = ComplaintEntity::delete_by_id(id).build(self.backend());
        self.stage(stmt).await;
        Ok(())
    }

    async fn save_changed(&self) -> anyhow::Result<bool> {
        self.save_changed().await
    }
}

impl DBRepository<Complaint> for OrmRepo {}

#[async_trait]
impl ComplaintRepo for OrmRepo {
    async fn get_visible_for_tenant(&self, tenant_id: Uuid) -> anyhow::Result<Vec<Complaint>> {
        ComplaintEntity::find()
            .filter(ComplaintColumn::TenantId.eq(tenant_id))
            .filter(ComplaintColumn::HiddenByTenant.eq(false))
            .order_by_desc(ComplaintColumn::CreatedTime)
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(Complaint::try_from)
            .collect()
    }

    async fn get_visible_for_landlord(&self, landlord_id: Uuid) -> anyhow::Result<Vec<Complaint>> {
        ComplaintEntity::find()
            .filter(ComplaintColumn::LandlordId.eq(landlord_id))
            .filter(ComplaintColumn::HiddenByLandlord.eq(false))
            .order_by_desc(ComplaintColumn::CreatedTime)
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(Complaint::try_from)
            .collect()
    }
}
