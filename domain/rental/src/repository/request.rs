use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::DBRepository;
use crate::model::entity::{Request, RequestStatus};

#[async_trait]
pub trait RequestRepo: DBRepository<Request> + Send + Sync {
    async fn get_by_tenant(&self, tenant_id: Uuid) -> anyhow::Result<Vec<Request>>;

    async fn get_by_landlord(&self, landlord_id: Uuid) -> anyhow::Result<Vec<Request>>;

    /// Approved requests of a tenant whose visit date lies in `[start, end)`.
    async fn get_approved_visits(
        &self,
        tenant_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Request>>;

    /// Requests still carrying the landlord's "new" badge.
    async fn count_new(&self, landlord_id: Uuid) -> anyhow::Result<u64>;

    /// Requests whose latest status change the tenant has not seen.
    async fn count_unread(&self, tenant_id: Uuid) -> anyhow::Result<u64>;

    /// Stages an update that only lands while the stored status is still
    /// `expected`; otherwise the commit fails with [`super::ConditionNotMet`].
    async fn update_from(&self, entity: &Request, expected: RequestStatus) -> anyhow::Result<()>;

    /// Guarded like [`RequestRepo::update_from`].
    async fn delete_from(&self, id: Uuid, expected: RequestStatus) -> anyhow::Result<()>;
}
