use std::sync::Arc;

use chrono::FixedOffset;
use domain_rental::{
    repository::{ComplaintRepo, NotificationRepo, RequestRepo, RoomRepo, TenantRepo},
    service::{ComplaintService, NotificationService, RequestService, RoomService},
};
use service_rental::{
    ComplaintServiceImpl, NotificationServiceImpl, RequestServiceImpl, RoomServiceImpl,
};

use super::{
    config::{DatabaseKind, RentalConfig},
    database::{Database, MemoryRepo, MemoryStore, OrmRepo},
};

/// Every repository trait, implemented by one unit of work.
pub trait RentalRepos: RequestRepo + RoomRepo + TenantRepo + NotificationRepo + ComplaintRepo {}

impl<T> RentalRepos for T where
    T: RequestRepo + RoomRepo + TenantRepo + NotificationRepo + ComplaintRepo
{
}

enum Backend {
    Postgres(Arc<Database>),
    Memory(Arc<MemoryStore>),
}

/// Builds request-scoped services. Each `*_service` call opens a fresh unit
/// of work shared by all repositories of that service.
pub struct ServiceProvider {
    config: RentalConfig,
    time_zone: FixedOffset,
    backend: Backend,
}

impl ServiceProvider {
    pub async fn build(config: RentalConfig) -> anyhow::Result<Self> {
        let backend = match config.db().kind() {
            DatabaseKind::Postgres => {
                Backend::Postgres(Arc::new(Database::connect(config.db()).await?))
            }
            DatabaseKind::Memory => Backend::Memory(Arc::new(MemoryStore::new())),
        };
        Self::with_backend(config, backend)
    }

    pub fn with_memory_store(config: RentalConfig, store: Arc<MemoryStore>) -> anyhow::Result<Self> {
        Self::with_backend(config, Backend::Memory(store))
    }

    fn with_backend(config: RentalConfig, backend: Backend) -> anyhow::Result<Self> {
        let offset = config.rental().time_zone_offset_secs();
        let time_zone = FixedOffset::east_opt(offset)
            .ok_or(anyhow::anyhow!("Time zone offset out of range: {offset}"))?;
        Ok(Self {
            config,
            time_zone,
            backend,
        })
    }

    pub fn config(&self) -> &RentalConfig {
        &self.config
    }

    pub fn request_service(&self) -> Arc<dyn RequestService> {
        match &self.backend {
            Backend::Postgres(db) => {
                self.request_service_over(Arc::new(OrmRepo::builder().db(db.clone()).build()))
            }
            Backend::Memory(store) => {
                self.request_service_over(Arc::new(MemoryRepo::new(store.clone())))
            }
        }
    }

    pub fn complaint_service(&self) -> Arc<dyn ComplaintService> {
        match &self.backend {
            Backend::Postgres(db) => {
                complaint_service_over(Arc::new(OrmRepo::builder().db(db.clone()).build()))
            }
            Backend::Memory(store) => {
                complaint_service_over(Arc::new(MemoryRepo::new(store.clone())))
            }
        }
    }

    pub fn notification_service(&self) -> Arc<dyn NotificationService> {
        match &self.backend {
            Backend::Postgres(db) => {
                notification_service_over(Arc::new(OrmRepo::builder().db(db.clone()).build()))
            }
            Backend::Memory(store) => {
                notification_service_over(Arc::new(MemoryRepo::new(store.clone())))
            }
        }
    }

    pub fn room_service(&self) -> Arc<dyn RoomService> {
        match &self.backend {
            Backend::Postgres(db) => {
                room_service_over(Arc::new(OrmRepo::builder().db(db.clone()).build()))
            }
            Backend::Memory(store) => {
                room_service_over(Arc::new(MemoryRepo::new(store.clone())))
            }
        }
    }

    fn request_service_over<R: RentalRepos + 'static>(&self, repo: Arc<R>) -> Arc<dyn RequestService> {
        Arc::new(
            RequestServiceImpl::builder()
                .request_repo(repo.clone())
                .room_repo(repo.clone())
                .tenant_repo(repo.clone())
                .notification_repo(repo)
                .time_zone(self.time_zone)
                .build(),
        )
    }
}

fn complaint_service_over<R: RentalRepos + 'static>(repo: Arc<R>) -> Arc<dyn ComplaintService> {
    Arc::new(
        ComplaintServiceImpl::builder()
            .complaint_repo(repo.clone())
            .room_repo(repo.clone())
            .notification_repo(repo)
            .build(),
    )
}

fn notification_service_over<R: RentalRepos + 'static>(repo: Arc<R>) -> Arc<dyn NotificationService> {
    Arc::new(NotificationServiceImpl::builder().notification_repo(repo).build())
}

fn room_service_over<R: RentalRepos + 'static>(repo: Arc<R>) -> Arc<dyn RoomService> {
    Arc::new(
        RoomServiceImpl::builder()
            .room_repo(repo.clone())
            .tenant_repo(repo.clone())
            .notification_repo(repo)
            .build(),
    )
}
