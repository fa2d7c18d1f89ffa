use async_trait::async_trait;
use uuid::Uuid;

/// The tenant store's occupied-room list.
#[async_trait]
pub trait TenantRepo: Send + Sync {
    async fn append_occupied_room(&self, tenant_id: Uuid, room_id: Uuid) -> anyhow::Result<()>;

    async fn remove_occupied_room(&self, tenant_id: Uuid, room_id: Uuid) -> anyhow::Result<()>;
}
