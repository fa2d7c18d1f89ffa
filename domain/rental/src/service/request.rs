use async_trait::async_trait;
use uuid::Uuid;

use crate::command::CreateRequestCommand;
use crate::exception::RentalResult;
use crate::model::entity::{Request, RequestAction};
use crate::model::vo::{Caller, RequestDetail};

#[async_trait]
pub trait RequestService: Send + Sync {
    async fn create(&self, caller: Caller, command: CreateRequestCommand) -> RentalResult<Request>;

    /// Every request where the caller is the party of its role.
    async fn list(&self, caller: Caller) -> RentalResult<Vec<RequestDetail>>;

    /// Applies one lifecycle action. Returns `None` when the request was deleted.
    async fn transition(
        &self,
        caller: Caller,
        request_id: Uuid,
        action: RequestAction,
    ) -> RentalResult<Option<Request>>;

    /// Approved requests visited today on rooms nobody has claimed yet.
    async fn visitable_today(&self, caller: Caller) -> RentalResult<Vec<RequestDetail>>;

    async fn mark_read(&self, caller: Caller, request_id: Uuid) -> RentalResult<()>;

    async fn unread_count(&self, caller: Caller) -> RentalResult<u64>;
}
