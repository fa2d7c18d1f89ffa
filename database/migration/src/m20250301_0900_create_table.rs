use database_model::rental::prelude::*;
use sea_orm_migration::{
    prelude::*,
    sea_orm::{DbBackend, EntityTrait, Schema},
};

pub struct Migration;

fn get_seaorm_create_stmt<E: EntityTrait>(e: E) -> TableCreateStatement {
    let schema = Schema::new(DbBackend::Postgres);
    schema.create_table_from_entity(e).if_not_exists().to_owned()
}

fn get_seaorm_drop_stmt<E: EntityTrait>(e: E) -> TableDropStatement {
    Table::drop().table(e).if_exists().to_owned()
}

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250301_0900_create_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let stmts = vec![
            get_seaorm_create_stmt(RoomEntity),
            get_seaorm_create_stmt(RoomRequestEntity),
            get_seaorm_create_stmt(TenantRoomEntity),
            get_seaorm_create_stmt(NotificationEntity),
            get_seaorm_create_stmt(ComplaintEntity),
        ];
        for stmt in stmts {
            manager.create_table(stmt).await?;
        }
        manager
            .create_foreign_key(
                sea_query::ForeignKey::create()
                    .name("FK_RoomRequest_Room")
                    .from(RoomRequestEntity, RoomRequestColumn::RoomId)
                    .to(RoomEntity, RoomColumn::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .on_update(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;
        manager
            .create_foreign_key(
                sea_query::ForeignKey::create()
                    .name("FK_TenantRoom_Room")
                    .from(TenantRoomEntity, TenantRoomColumn::RoomId)
                    .to(RoomEntity, RoomColumn::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .on_update(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;
        manager
            .create_foreign_key(
                sea_query::ForeignKey::create()
                    .name("FK_Complaint_Room")
                    .from(ComplaintEntity, ComplaintColumn::RoomId)
                    .to(RoomEntity, RoomColumn::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .on_update(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("UQ_TenantRoom_Tenant_Room")
                    .table(TenantRoomEntity)
                    .col(TenantRoomColumn::TenantId)
                    .col(TenantRoomColumn::RoomId)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("IX_Notification_Recipient")
                    .table(NotificationEntity)
                    .col(NotificationColumn::Recipient)
                    .col(NotificationColumn::TenantId)
                    .col(NotificationColumn::LandlordId)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let stmts = vec![
            get_seaorm_drop_stmt(ComplaintEntity),
            get_seaorm_drop_stmt(NotificationEntity),
            get_seaorm_drop_stmt(TenantRoomEntity),
            get_seaorm_drop_stmt(RoomRequestEntity),
            get_seaorm_drop_stmt(RoomEntity),
        ];
        for stmt in stmts {
            manager.drop_table(stmt).await?;
        }
        Ok(())
    }
}
