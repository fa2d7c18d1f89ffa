use async_trait::async_trait;
use uuid::Uuid;

use super::DBRepository;
use crate::model::entity::Complaint;

#[async_trait]
pub trait ComplaintRepo: DBRepository<Complaint> + Send + Sync {
    /// Complaints the tenant has not hidden.
    async fn get_visible_for_tenant(&self, tenant_id: Uuid) -> anyhow::Result<Vec<Complaint>>;

    /// Complaints the landlord has not hidden.
    async fn get_visible_for_landlord(&self, landlord_id: Uuid) -> anyhow::Result<Vec<Complaint>>;
}
