use sea_orm_migration::{sea_orm::Database, *};

mod m20250301_0900_create_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250301_0900_create_table::Migration)]
    }
}

impl Migrator {
    pub async fn migration_up(db_con: &str) -> Result<(), DbErr> {
        Migrator::up(&Database::connect(db_con).await?, None).await
    }

    pub async fn migration_down(db_con: &str) -> Result<(), DbErr> {
        Migrator::down(&Database::connect(db_con).await?, None).await
    }
}
