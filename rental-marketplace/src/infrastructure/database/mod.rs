mod memory;
mod orm;

use std::time::Duration;

use sea_orm::{ConnectOptions, DatabaseConnection};

pub use memory::{MemoryRepo, MemoryStore};
pub use orm::OrmRepo;

use super::config::DatabaseConfig;

#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let mut options = ConnectOptions::new(config.url().to_owned());
        options
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs()))
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs()))
            .sqlx_logging(false);
        let connection = sea_orm::Database::connect(options).await?;
        Ok(Database { connection })
    }

    pub fn get_connection(&self) -> &DatabaseConnection {
        &self.connection
    }
}
