mod complaint;
mod notification;
mod request;
mod room;
mod tenant;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[rustfmt::skip]
pub use {
    complaint::ComplaintRepo,
    notification::NotificationRepo,
    request::RequestRepo,
    room::RoomRepo,
    tenant::TenantRepo,
};

#[async_trait]
pub trait ReadOnlyRepository<T>: Send + Sync
where
    T: Send + Sync,
{
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<T>>;
}

/// Writes are staged and only reach the store on [`MutableRepository::save_changed`],
/// which commits everything staged in the current scope as one transaction.
#[async_trait]
pub trait MutableRepository<T>: Send + Sync
where
    T: Send + Sync,
{
    async fn insert(&self, entity: &T) -> anyhow::Result<Uuid>;

    async fn update(&self, entity: &T) -> anyhow::Result<()>;

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<()>;

    /// Commits staged writes. Returns whether anything was committed.
    async fn save_changed(&self) -> anyhow::Result<bool>;
}

pub trait DBRepository<T>: ReadOnlyRepository<T> + MutableRepository<T>
where
    T: Send + Sync,
{
}

/// A guarded write matched no rows, so the whole commit was rolled back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Conditional write on {entity} {id} matched no rows.")]
pub struct ConditionNotMet {
    pub entity: &'static str,
    pub id: Uuid,
}
