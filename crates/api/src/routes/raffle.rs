//! Route definitions for the `/raffle` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::raffle;
use crate::state::AppState;

/// Routes mounted at `/raffle`.
///
/// ```text
/// GET    /                  -> board
/// GET    /history           -> history
/// POST   /slots             -> reserve  (form: numero, nome)
/// PUT    /slots             -> edit     (form: numero_antigo, novo_nome, novo_numero)
/// DELETE /slots/{number}    -> delete_slot
/// POST   /draw              -> draw
/// POST   /reset             -> reset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(raffle::board))
        .route("/history", get(raffle::history))
        .route("/slots", post(raffle::reserve).put(raffle::edit))
        .route("/slots/{number}", delete(raffle::delete_slot))
        .route("/draw", post(raffle::draw))
        .route("/reset", post(raffle::reset))
}
