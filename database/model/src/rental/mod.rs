mod complaint;
mod notification;
mod room;
mod room_request;
mod tenant_room;

pub mod prelude {
    pub use super::{
        complaint::{
            ActiveModel as ComplaintActiveModel, Column as ComplaintColumn,
            Entity as ComplaintEntity, Model as ComplaintModel, PrimaryKey as ComplaintPrimaryKey,
            Relation as ComplaintRelation,
        },
        notification::{
            ActiveModel as NotificationActiveModel, Column as NotificationColumn,
            Entity as NotificationEntity, Model as NotificationModel,
            PrimaryKey as NotificationPrimaryKey, Relation as NotificationRelation,
        },
        room::{
            ActiveModel as RoomActiveModel, Column as RoomColumn, Entity as RoomEntity,
            Model as RoomModel, PrimaryKey as RoomPrimaryKey, Relation as RoomRelation,
        },
        room_request::{
            ActiveModel as RoomRequestActiveModel, Column as RoomRequestColumn,
            Entity as RoomRequestEntity, Model as RoomRequestModel,
            PrimaryKey as RoomRequestPrimaryKey, Relation as RoomRequestRelation,
        },
        tenant_room::{
            ActiveModel as TenantRoomActiveModel, Column as TenantRoomColumn,
            Entity as TenantRoomEntity, Model as TenantRoomModel,
            PrimaryKey as TenantRoomPrimaryKey, Relation as TenantRoomRelation,
        },
    };
}
