pub mod health;
pub mod raffle;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /raffle                          board (grid, history, summary)
/// /raffle/history                  winner history
/// /raffle/slots                    reserve (POST), edit (PUT)
/// /raffle/slots/{number}           delete
/// /raffle/draw                     draw a winner (POST)
/// /raffle/reset                    clear every slot (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/raffle", raffle::router())
}
