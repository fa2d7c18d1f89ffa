use std::sync::Arc;

use async_trait::async_trait;
use domain_rental::{
    exception::{RentalException, RentalResult},
    model::{
        entity::{Notification, NotificationKind},
        vo::Caller,
    },
    repository::NotificationRepo,
    service::NotificationService,
};
use uuid::Uuid;

/// 通知收件箱
#[derive(typed_builder::TypedBuilder)]
pub struct NotificationServiceImpl {
    notification_repo: Arc<dyn NotificationRepo>,
}

#[async_trait]
impl NotificationService for NotificationServiceImpl {
    async fn list(
        &self,
        caller: Caller,
        kind: Option<NotificationKind>,
    ) -> RentalResult<Vec<Notification>> {
        Ok(self
            .notification_repo
            .get_for_recipient(caller.role, caller.id, kind)
            .await?)
    }

    async fn mark_read(&self, caller: Caller, notification_id: Uuid) -> RentalResult<()> {
        let mut notification = self.get_addressed(&caller, notification_id).await?;
        if notification.is_read {
            return Ok(());
        }
        notification.is_read = true;
        self.notification_repo.update(&notification).await?;
        self.notification_repo.save_changed().await?;
        Ok(())
    }

    async fn mark_all_read(&self, caller: Caller) -> RentalResult<()> {
        self.notification_repo.mark_all_read(caller.role, caller.id).await?;
        self.notification_repo.save_changed().await?;
        Ok(())
    }

    async fn unread_count(&self, caller: Caller) -> RentalResult<u64> {
        Ok(self.notification_repo.count_unread(caller.role, caller.id).await?)
    }

    async fn delete(&self, caller: Caller, notification_id: Uuid) -> RentalResult<()> {
        self.get_addressed(&caller, notification_id).await?;
        self.notification_repo.delete_by_id(notification_id).await?;
        self.notification_repo.save_changed().await?;
        tracing::info!(%notification_id, "notification deleted");
        Ok(())
    }
}

impl NotificationServiceImpl {
    /// Someone else's notification is reported as missing.
    async fn get_addressed(&self, caller: &Caller, id: Uuid) -> RentalResult<Notification> {
        self.notification_repo
            .get_by_id(id)
            .await?
            .filter(|n| n.is_addressed_to(caller.role, caller.id))
            .ok_or(RentalException::NotificationNotFound { id })
    }
}
