//! 通知
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notification")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub landlord_id: Uuid,
    /// 接收方角色
    pub recipient: i32,
    pub r#type: i32,
    pub status: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    #[sea_orm(nullable)]
    pub request_id: Option<Uuid>,
    #[sea_orm(nullable)]
    pub room_id: Option<Uuid>,
    #[sea_orm(nullable)]
    pub complaint_id: Option<Uuid>,
    pub is_read: bool,
    pub created_time: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
