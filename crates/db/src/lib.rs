//! Postgres persistence for the raffle ledger.
//!
//! Exposes pool setup, embedded migrations, the `slots` row model and
//! [`repositories::SlotRepo`], which runs every ledger operation against
//! the pool it is handed.

use raffle_core::slot::SlotStatus;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Migrations embedded from `db/migrations`.
static MIGRATOR: Migrator = sqlx::migrate!("../../db/migrations");

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Whether the schema can serve ledger operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerReadiness {
    /// Every stored status has its `slot_statuses` row with the expected name.
    pub statuses_seeded: bool,
    /// Embedded migrations not yet recorded as applied.
    pub pending_migrations: usize,
}

impl LedgerReadiness {
    pub fn is_ready(&self) -> bool {
        self.statuses_seeded && self.pending_migrations == 0
    }
}

/// Inspect the seed rows and the migration table.
pub async fn ledger_readiness(pool: &DbPool) -> Result<LedgerReadiness, sqlx::Error> {
    let seeded: Vec<(i16, String)> = sqlx::query_as("SELECT id, name FROM slot_statuses")
        .fetch_all(pool)
        .await?;
    let statuses_seeded = [SlotStatus::Sold, SlotStatus::Drawn].iter().all(|status| {
        seeded
            .iter()
            .any(|(id, name)| Some(*id) == status.status_id() && name == status.as_str())
    });

    let applied: Vec<i64> =
        sqlx::query_scalar("SELECT version FROM _sqlx_migrations WHERE success")
            .fetch_all(pool)
            .await?;
    let pending_migrations = MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .filter(|m| !applied.contains(&m.version))
        .count();

    Ok(LedgerReadiness {
        statuses_seeded,
        pending_migrations,
    })
}
