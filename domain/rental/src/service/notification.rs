use async_trait::async_trait;
use uuid::Uuid;

use crate::exception::RentalResult;
use crate::model::entity::{Notification, NotificationKind};
use crate::model::vo::Caller;

#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn list(
        &self,
        caller: Caller,
        kind: Option<NotificationKind>,
    ) -> RentalResult<Vec<Notification>>;

    async fn mark_read(&self, caller: Caller, notification_id: Uuid) -> RentalResult<()>;

    async fn mark_all_read(&self, caller: Caller) -> RentalResult<()>;

    async fn unread_count(&self, caller: Caller) -> RentalResult<u64>;

    async fn delete(&self, caller: Caller, notification_id: Uuid) -> RentalResult<()>;
}
