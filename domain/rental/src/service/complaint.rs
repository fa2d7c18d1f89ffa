use async_trait::async_trait;
use uuid::Uuid;

use crate::command::CreateComplaintCommand;
use crate::exception::RentalResult;
use crate::model::entity::{Complaint, ComplaintStatus};
use crate::model::vo::Caller;

#[async_trait]
pub trait ComplaintService: Send + Sync {
    async fn create(&self, caller: Caller, command: CreateComplaintCommand) -> RentalResult<Complaint>;

    async fn list(&self, caller: Caller) -> RentalResult<Vec<Complaint>>;

    async fn set_status(
        &self,
        caller: Caller,
        complaint_id: Uuid,
        status: ComplaintStatus,
    ) -> RentalResult<Complaint>;

    /// Tenant or landlord hide, chosen by the caller's role.
    async fn hide(&self, caller: Caller, complaint_id: Uuid) -> RentalResult<Complaint>;
}
