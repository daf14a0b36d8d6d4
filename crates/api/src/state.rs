/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Handlers borrow a connection from the pool per ledger call; nothing
/// request-scoped is stored here.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: raffle_db::DbPool,
}
