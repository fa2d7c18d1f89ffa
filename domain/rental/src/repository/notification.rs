use async_trait::async_trait;
use uuid::Uuid;

use super::DBRepository;
use crate::model::entity::{Notification, NotificationKind};
use crate::model::vo::Role;

#[async_trait]
pub trait NotificationRepo: DBRepository<Notification> + Send + Sync {
    /// Newest first.
    async fn get_for_recipient(
        &self,
        recipient: Role,
        party_id: Uuid,
        kind: Option<NotificationKind>,
    ) -> anyhow::Result<Vec<Notification>>;

    async fn count_unread(&self, recipient: Role, party_id: Uuid) -> anyhow::Result<u64>;

    async fn mark_all_read(&self, recipient: Role, party_id: Uuid) -> anyhow::Result<()>;
}
