use async_trait::async_trait;
use database_model::rental::prelude::*;
use domain_rental::{
    model::{
        entity::{Notification, NotificationKind},
        vo::Role,
    },
    repository::{DBRepository, MutableRepository, NotificationRepo, ReadOnlyRepository},
};
use sea_orm::{
    prelude::*, sea_query::Expr, ActiveValue, Condition, PaginatorTrait, QueryOrder, QueryTrait,
};

use crate::infrastructure::database::OrmRepo;

fn addressed_to(recipient: Role, party_id: Uuid) -> Condition {
    let party = match recipient {
        Role::Tenant => NotificationColumn::TenantId.eq(party_id),
        Role::Landlord => NotificationColumn::LandlordId.eq(party_id),
    };
    Condition::all()
        .add(NotificationColumn::Recipient.eq(recipient as i32))
        .add(party)
}

#[async_trait]
impl ReadOnlyRepository<Notification> for OrmRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Notification>> {
        NotificationEntity::find_by_id(id)
            .one(self.db.get_connection())
            .await?
            .map(Notification::try_from)
            .transpose()
    }
}

#[async_trait]
impl MutableRepository<Notification> for OrmRepo {
    async fn insert(&self, entity: &Notification) -> anyhow::Result<Uuid> {
        let active_model: NotificationActiveModel =
            NotificationModel::from(entity.to_owned()).into();
        let stmt = NotificationEntity::insert(active_model.reset_all()).build(self.backend());
        self.stage(stmt).await;
        Ok(entity.id)
    }

    /// Only the read flag changes after a notification is written.
    async fn update(&self, entity: &Notification) -> anyhow::Result<()> {
        let stmt = NotificationEntity::update(NotificationActiveModel {
            id: ActiveValue::Unchanged(entity.id),
            is_read: ActiveValue::Set(entity.is_read),
            ..Default::default()
        })
        .build(self.backend());
        self.stage(stmt).await;
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<()> {
        let stmt = NotificationEntity::delete_by_id(id).build(self.backend());
        self.stage(stmt).await;
        Ok(())
    }

    async fn save_changed(&self) -> anyhow::Result<bool> {
        self.save_changed().await
    }
}

impl DBRepository<Notification> for OrmRepo {}

#[async_trait]
impl NotificationRepo for OrmRepo {
    async fn get_for_recipient(
        &self,
        recipient: Role,
        party_id: Uuid,
        kind: Option<NotificationKind>,
    ) -> anyhow::Result<Vec<Notification>> {
        NotificationEntity::find()
            .filter(addressed_to(recipient, party_id))
            .apply_if(kind, |query, kind| {
                query.filter(NotificationColumn::Type.eq(kind as i32))
            })
            .order_by_desc(NotificationColumn::CreatedTime)
            .all(self.db.get_connection())
            .await?
            .into_iter()
            .map(Notification::try_from)
            .collect()
    }

    async fn count_unread(&self, recipient: Role, party_id: Uuid) -> anyhow::Result<u64> {
        Ok(NotificationEntity::find()
            .filter(addressed_to(recipient, party_id))
            .filter(NotificationColumn::IsRead.eq(false))
            .count(self.db.get_connection())
            .await?)
    }

    async fn mark_all_read(&self, recipient: Role, party_id: Uuid) -> anyhow::Result<()> {
        let stmt = NotificationEntity::update_many()
            .col_expr(NotificationColumn::IsRead, Expr::value(true))
            .filter(addressed_to(recipient, party_id))
            .filter(NotificationColumn::IsRead.eq(false))
            .build(self.backend());
        self.stage(stmt).await;
        Ok(())
    }
}
