use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::{
    model::{
        entity::{Complaint, Notification, NotificationKind, Request, RequestStatus, Room},
        vo::Role,
    },
    repository::*,
};

mock! {
    pub RequestRepo {}
    #[async_trait]
    impl RequestRepo for RequestRepo {
        async fn get_by_tenant(&self, tenant_id: Uuid) -> anyhow::Result<Vec<Request>>;
        async fn get_by_landlord(&self, landlord_id: Uuid) -> anyhow::Result<Vec<Request>>;
        async fn get_approved_visits(
            &self,
            tenant_id: Uuid,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> anyhow::Result<Vec<Request>>;
        async fn count_new(&self, landlord_id: Uuid) -> anyhow::Result<u64>;
        async fn count_unread(&self, tenant_id: Uuid) -> anyhow::Result<u64>;
        async fn update_from(&self, entity: &Request, expected: RequestStatus) -> anyhow::Result<()>;
        async fn delete_from(&self, id: Uuid, expected: RequestStatus) -> anyhow::Result<()>;
    }
    #[async_trait]
    impl ReadOnlyRepository<Request> for RequestRepo {
        async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Request>>;
    }
    #[async_trait]
    impl MutableRepository<Request> for RequestRepo {
        async fn insert(&self, entity: &Request) -> anyhow::Result<Uuid>;
        async fn update(&self, entity: &Request) -> anyhow::Result<()>;
        async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<()>;
        async fn save_changed(&self) -> anyhow::Result<bool>;
    }
    impl DBRepository<Request> for RequestRepo {}
}

mock! {
    pub RoomRepo {}
    #[async_trait]
    impl RoomRepo for RoomRepo {
        async fn get_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Room>>;
        async fn get_by_tenant(&self, tenant_id: Uuid) -> anyhow::Result<Vec<Room>>;
        async fn claim_occupancy(
            &self,
            room_id: Uuid,
            tenant_id: Uuid,
            joining_date: DateTime<Utc>,
        ) -> anyhow::Result<()>;
        async fn release_occupancy(&self, room_id: Uuid, tenant_id: Uuid) -> anyhow::Result<()>;
    }
    #[async_trait]
    impl ReadOnlyRepository<Room> for RoomRepo {
        async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Room>>;
    }
}

mock! {
    pub TenantRepo {}
    #[async_trait]
    impl TenantRepo for TenantRepo {
        async fn append_occupied_room(&self, tenant_id: Uuid, room_id: Uuid) -> anyhow::Result<()>;
        async fn remove_occupied_room(&self, tenant_id: Uuid, room_id: Uuid) -> anyhow::Result<()>;
    }
}

mock! {
    pub NotificationRepo {}
    #[async_trait]
    impl NotificationRepo for NotificationRepo {
        async fn get_for_recipient(
            &self,
            recipient: Role,
            party_id: Uuid,
            kind: Option<NotificationKind>,
        ) -> anyhow::Result<Vec<Notification>>;
        async fn count_unread(&self, recipient: Role, party_id: Uuid) -> anyhow::Result<u64>;
        async fn mark_all_read(&self, recipient: Role, party_id: Uuid) -> anyhow::Result<()>;
    }
    #[async_trait]
    impl ReadOnlyRepository<Notification> for NotificationRepo {
        async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Notification>>;
    }
    #[async_trait]
    impl MutableRepository<Notification> for NotificationRepo {
        async fn insert(&self, entity: &Notification) -> anyhow::Result<Uuid>;
        async fn update(&self, entity: &Notification) -> anyhow::Result<()>;
        async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<()>;
        async fn save_changed(&self) -> anyhow::Result<bool>;
    }
    impl DBRepository<Notification> for NotificationRepo {}
}

mock! {
    pub ComplaintRepo {}
    #[async_trait]
    impl ComplaintRepo for ComplaintRepo {
        async fn get_visible_for_tenant(&self, tenant_id: Uuid) -> anyhow::Result<Vec<Complaint>>;
        async fn get_visible_for_landlord(&self, landlord_id: Uuid) -> anyhow::Result<Vec<Complaint>>;
    }
    #[async_trait]
    impl ReadOnlyRepository<Complaint> for ComplaintRepo {
        async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Complaint>>;
    }
    #[async_trait]
    impl MutableRepository<Complaint> for ComplaintRepo {
        async fn insert(&self, entity: &Complaint) -> anyhow::Result<Uuid>;
        async fn update(&self, entity: &Complaint) -> anyhow::Result<()>;
        async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<()>;
        async fn save_changed(&self) -> anyhow::Result<bool>;
    }
    impl DBRepository<Complaint> for ComplaintRepo {}
}
