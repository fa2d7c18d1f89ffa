use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::ReadOnlyRepository;
use crate::model::entity::Room;

#[async_trait]
pub trait RoomRepo: ReadOnlyRepository<Room> + Send + Sync {
    async fn get_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Room>>;

    async fn get_by_tenant(&self, tenant_id: Uuid) -> anyhow::Result<Vec<Room>>;

    /// Stages "assign `tenant_id` only if the room has no tenant".
    ///
    /// The commit fails with [`super::ConditionNotMet`] when another tenant got
    /// there first.
    async fn claim_occupancy(
        &self,
        room_id: Uuid,
        tenant_id: Uuid,
        joining_date: DateTime<Utc>,
    ) -> anyhow::Result<()>;

    /// Stages "vacate only if `tenant_id` is still the assigned tenant".
    async fn release_occupancy(&self, room_id: Uuid, tenant_id: Uuid) -> anyhow::Result<()>;
}
