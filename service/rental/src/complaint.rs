use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use domain_rental::{
    command::CreateComplaintCommand,
    exception::{RentalException, RentalResult},
    model::{
        entity::{Complaint, ComplaintStatus},
        vo::{Caller, Role},
    },
    repository::{ComplaintRepo, NotificationRepo, RoomRepo},
    service::ComplaintService,
};
use uuid::Uuid;

#[derive(typed_builder::TypedBuilder)]
pub struct ComplaintServiceImpl {
    complaint_repo: Arc<dyn ComplaintRepo>,
    room_repo: Arc<dyn RoomRepo>,
    notification_repo: Arc<dyn NotificationRepo>,
}

#[async_trait]
impl ComplaintService for ComplaintServiceImpl {
    async fn create(&self, caller: Caller, command: CreateComplaintCommand) -> RentalResult<Complaint> {
        caller.require_role(Role::Tenant, "create complaint")?;
        let room_id = command.room_id.ok_or(RentalException::MissingField { field: "roomId" })?;
        let room = self
            .room_repo
            .get_by_id(room_id)
            .await?
            .ok_or(RentalException::RoomNotFound { id: room_id })?;

        let now = Utc::now();
        let complaint = Complaint::new(&caller, &room, command.kind, command.description, now)?;
        self.complaint_repo.insert(&complaint).await?;
        self.notification_repo.insert(&complaint.created_notification(now)).await?;
        self.complaint_repo.save_changed().await?;

        tracing::info!(complaint_id = %complaint.id, %room_id, "complaint filed");
        Ok(complaint)
    }

    async fn list(&self, caller: Caller) -> RentalResult<Vec<Complaint>> {
        Ok(match caller.role {
            Role::Tenant => self.complaint_repo.get_visible_for_tenant(caller.id).await?,
            Role::Landlord => self.complaint_repo.get_visible_for_landlord(caller.id).await?,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn set_status(
        &self,
        caller: Caller,
        complaint_id: Uuid,
        status: ComplaintStatus,
    ) -> RentalResult<Complaint> {
        let mut complaint = self.get_complaint(complaint_id).await?;
        let notification = complaint.set_status(&caller, status, Utc::now())?;
        self.complaint_repo.update(&complaint).await?;
        self.notification_repo.insert(&notification).await?;
        self.complaint_repo.save_changed().await?;

        tracing::info!(%complaint_id, %status, "complaint status changed");
        Ok(complaint)
    }

    async fn hide(&self, caller: Caller, complaint_id: Uuid) -> RentalResult<Complaint> {
        let mut complaint = self.get_complaint(complaint_id).await?;
        let notification = complaint.hide(&caller, Utc::now())?;
        self.complaint_repo.update(&complaint).await?;
        if let Some(notification) = notification {
            self.notification_repo.insert(&notification).await?;
        }
        self.complaint_repo.save_changed().await?;

        tracing::info!(%complaint_id, by = %caller.role, "complaint hidden");
        Ok(complaint)
    }
}

impl ComplaintServiceImpl {
    async fn get_complaint(&self, id: Uuid) -> RentalResult<Complaint> {
        self.complaint_repo
            .get_by_id(id)
            .await?
            .ok_or(RentalException::ComplaintNotFound { id })
    }
}
