//! Liveness and ledger readiness at `/health`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use raffle_db::LedgerReadiness;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Database reachable, statuses seeded, no pending migrations.
    Ok,
    /// Database reachable but the schema cannot serve ledger operations.
    Degraded,
    /// Database unreachable.
    Unavailable,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub db_reachable: bool,
    /// `None` when the database could not be queried.
    pub statuses_seeded: Option<bool>,
    pub pending_migrations: Option<usize>,
}

impl HealthResponse {
    fn from_readiness(readiness: Option<LedgerReadiness>) -> Self {
        let status = match readiness {
            Some(r) if r.is_ready() => HealthStatus::Ok,
            Some(_) => HealthStatus::Degraded,
            None => HealthStatus::Unavailable,
        };
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            db_reachable: readiness.is_some(),
            statuses_seeded: readiness.map(|r| r.statuses_seeded),
            pending_migrations: readiness.map(|r| r.pending_migrations),
        }
    }
}

/// GET /health
///
/// Always 200 so load balancers can tell a live process from a dead one;
/// `status` says whether the ledger can take requests.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let readiness = match raffle_db::ledger_readiness(&state.pool).await {
        Ok(readiness) => Some(readiness),
        Err(err) => {
            tracing::warn!(error = %err, "Ledger readiness check failed");
            None
        }
    };
    if let Some(r) = readiness.filter(|r| !r.is_ready()) {
        tracing::warn!(
            statuses_seeded = r.statuses_seeded,
            pending_migrations = r.pending_migrations,
            "Ledger schema not ready"
        );
    }

    Json(HealthResponse::from_readiness(readiness))
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_schema_reports_ok() {
        let response = HealthResponse::from_readiness(Some(LedgerReadiness {
            statuses_seeded: true,
            pending_migrations: 0,
        }));
        assert!(matches!(response.status, HealthStatus::Ok));
        assert!(response.db_reachable);
    }

    #[test]
    fn pending_migration_degrades() {
        let response = HealthResponse::from_readiness(Some(LedgerReadiness {
            statuses_seeded: true,
            pending_migrations: 1,
        }));
        assert!(matches!(response.status, HealthStatus::Degraded));
        assert_eq!(response.pending_migrations, Some(1));
    }

    #[test]
    fn unreachable_database_is_unavailable() {
        let response = HealthResponse::from_readiness(None);
        assert!(matches!(response.status, HealthStatus::Unavailable));
        assert!(!response.db_reachable);
        assert_eq!(response.statuses_seeded, None);
    }
}
