//! 房源（仅包含入住相关字段）
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "room")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub landlord_id: Uuid,
    pub address: String,
    pub rent: i64,
    pub status: i32,
    pub is_active: bool,
    /// 当前入住租客，每个入住周期只写入一次
    #[sea_orm(nullable)]
    pub tenant_id: Option<Uuid>,
    #[sea_orm(nullable)]
    pub joining_date: Option<DateTimeUtc>,
    pub created_time: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::room_request::Entity")]
    RoomRequest,
    #[sea_orm(has_many = "super::complaint::Entity")]
    Complaint,
}

impl Related<super::room_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomRequest.def()
    }
}

impl Related<super::complaint::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Complaint.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
