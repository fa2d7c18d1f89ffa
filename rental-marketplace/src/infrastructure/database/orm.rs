use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use domain_rental::repository::ConditionNotMet;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement, TransactionTrait};
use tokio::sync::Mutex;
use typed_builder::TypedBuilder;

use super::Database;

/// A staged statement. Guarded statements must touch at least one row or the
/// whole batch is rolled back.
pub struct StagedStatement {
    pub stmt: Statement,
    pub guard: Option<ConditionNotMet>,
}

/// Per-scope sea-orm unit of work: reads go straight to the pool, writes are
/// buffered until [`OrmRepo::save_changed`].
#[derive(TypedBuilder)]
pub struct OrmRepo {
    pub db: Arc<Database>,
    #[builder(default)]
    pub statements: Arc<Mutex<Vec<StagedStatement>>>,
    #[builder(default = AtomicBool::new(true))]
    pub can_drop: AtomicBool,
}

impl OrmRepo {
    pub fn backend(&self) -> DatabaseBackend {
        self.db.get_connection().get_database_backend()
    }

    pub async fn stage(&self, stmt: Statement) {
        self.push(StagedStatement { stmt, guard: None }).await
    }

    pub async fn stage_guarded(&self, stmt: Statement, guard: ConditionNotMet) {
        self.push(StagedStatement {
            stmt,
            guard: Some(guard),
        })
        .await
    }

    async fn push(&self, staged: StagedStatement) {
        self.statements.lock().await.push(staged);
        self.can_drop.store(false, Ordering::Relaxed);
    }

    pub async fn save_changed(&self) -> anyhow::Result<bool> {
        if self.can_drop.load(Ordering::Relaxed) {
            return Ok(false);
        }
        let mut stmts = self.statements.lock().await;
        let staged = std::mem::take(&mut *stmts);
        self.can_drop.store(true, Ordering::Relaxed);

        let trans = self.db.get_connection().begin().await?;
        for StagedStatement { stmt, guard } in staged {
            let rows_affected = match trans.execute(stmt).await {
                Ok(result) => result.rows_affected(),
                Err(e) => {
                    trans.rollback().await?;
                    anyhow::bail!(e);
                }
            };
            if let Some(guard) = guard.filter(|_| rows_affected == 0) {
                trans.rollback().await?;
                tracing::debug!(entity = guard.entity, id = %guard.id, "guarded write lost");
                return Err(guard.into());
            }
        }
        trans.commit().await?;
        Ok(true)
    }
}

impl Drop for OrmRepo {
    fn drop(&mut self) {
        if self.can_drop.load(Ordering::Relaxed) {
            return;
        }
        if let Ok(stmts) = self.statements.try_lock() {
            let sqls = stmts.iter().map(|x| x.stmt.to_string()).collect::<Vec<String>>().join("\n");
            tracing::trace!("Unused sql statements:\n{sqls}")
        }
    }
}
