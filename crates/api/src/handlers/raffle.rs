//! Handlers for the `/raffle` resource.
//!
//! Mutations take `application/x-www-form-urlencoded` bodies. Numbers are
//! accepted as text and parsed by the ledger's validation, so a malformed
//! value is reported as `INVALID_NUMBER` instead of a form rejection.

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Form, Json};
use raffle_core::board::{HistoryEntry, RaffleBoard};
use raffle_core::slot::{parse_number, SlotStatus};
use raffle_core::types::{SlotNumber, Timestamp};
use raffle_db::models::slot::{CreateSlot, EditSlot, Slot};
use raffle_db::repositories::SlotRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, MutationResponse, Notice};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Form body for reserving a number.
#[derive(Debug, Deserialize)]
pub struct ReserveForm {
    #[serde(rename = "numero", default)]
    pub number: String,
    #[serde(rename = "nome", default)]
    pub name: String,
}

/// Form body for renaming and/or renumbering a reservation.
#[derive(Debug, Deserialize)]
pub struct EditForm {
    #[serde(rename = "numero_antigo", default)]
    pub old_number: String,
    #[serde(rename = "novo_nome", default)]
    pub new_name: String,
    #[serde(rename = "novo_numero", default)]
    pub new_number: String,
}

/// A slot as returned by mutation endpoints.
#[derive(Debug, Serialize)]
pub struct SlotResponse {
    pub number: SlotNumber,
    pub holder_name: String,
    pub status: SlotStatus,
    pub drawn_at: Option<Timestamp>,
}

impl TryFrom<Slot> for SlotResponse {
    type Error = raffle_core::error::CoreError;

    fn try_from(slot: Slot) -> Result<Self, Self::Error> {
        let status = slot.status()?;
        Ok(Self {
            number: slot.number,
            holder_name: slot.holder_name,
            status,
            drawn_at: slot.drawn_at,
        })
    }
}

/// Payload for a successful delete.
#[derive(Debug, Serialize)]
pub struct DeletedSlot {
    pub number: SlotNumber,
}

/// Payload for a successful reset.
#[derive(Debug, Serialize)]
pub struct ResetSummary {
    pub removed: u64,
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/raffle
///
/// All 100 numbers with their status, the winner history and per-status
/// counts.
pub async fn board(State(state): State<AppState>) -> AppResult<Json<DataResponse<RaffleBoard>>> {
    let board = SlotRepo::board(&state.pool).await?;
    Ok(Json(DataResponse { data: board }))
}

/// GET /api/v1/raffle/history
pub async fn history(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<HistoryEntry>>>> {
    let history = SlotRepo::history(&state.pool).await?;
    Ok(Json(DataResponse { data: history }))
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// POST /api/v1/raffle/slots
pub async fn reserve(
    State(state): State<AppState>,
    form: Result<Form<ReserveForm>, FormRejection>,
) -> AppResult<(StatusCode, Json<MutationResponse<SlotResponse>>)> {
    let Form(form) = form.map_err(form_rejection)?;
    let input = CreateSlot {
        number: parse_number(&form.number)?,
        holder_name: form.name,
    };
    let slot = SlotRepo::reserve(&state.pool, &input).await?;

    let notice = Notice::success(format!(
        "Participant '{}' added with number {}.",
        slot.holder_name, slot.number
    ));
    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            data: slot.try_into()?,
            notice,
        }),
    ))
}

/// PUT /api/v1/raffle/slots
///
/// Renames the reservation at `numero_antigo` and moves it to
/// `novo_numero` when that differs.
pub async fn edit(
    State(state): State<AppState>,
    form: Result<Form<EditForm>, FormRejection>,
) -> AppResult<Json<MutationResponse<SlotResponse>>> {
    let Form(form) = form.map_err(form_rejection)?;
    let input = EditSlot {
        old_number: parse_number(&form.old_number)?,
        new_number: parse_number(&form.new_number)?,
        holder_name: form.new_name,
    };
    let slot = SlotRepo::edit(&state.pool, &input).await?;

    let notice = Notice::success(format!(
        "Number {} updated to {} ({}).",
        input.old_number, slot.holder_name, slot.number
    ));
    Ok(Json(MutationResponse {
        data: slot.try_into()?,
        notice,
    }))
}

/// DELETE /api/v1/raffle/slots/{number}
///
/// Returns the number to available. Drawn numbers cannot be deleted.
pub async fn delete_slot(
    State(state): State<AppState>,
    Path(raw_number): Path<String>,
) -> AppResult<Json<MutationResponse<DeletedSlot>>> {
    let number = parse_number(&raw_number)?;
    SlotRepo::delete(&state.pool, number).await?;

    Ok(Json(MutationResponse {
        data: DeletedSlot { number },
        notice: Notice::success(format!("Number {number} removed from the sales record.")),
    }))
}

/// POST /api/v1/raffle/draw
///
/// Picks a winner uniformly among the sold numbers. Returns 409 with
/// `NO_ELIGIBLE_CANDIDATES` when nothing is left to draw.
pub async fn draw(
    State(state): State<AppState>,
) -> AppResult<Json<MutationResponse<SlotResponse>>> {
    let slot = SlotRepo::draw(&state.pool).await?;

    let notice = Notice::success(format!(
        "Winner! Number {} for {} was drawn and added to the history.",
        slot.number, slot.holder_name
    ));
    Ok(Json(MutationResponse {
        data: slot.try_into()?,
        notice,
    }))
}

/// POST /api/v1/raffle/reset
///
/// Clears every reservation and the winner history.
pub async fn reset(State(state): State<AppState>) -> AppResult<Json<MutationResponse<ResetSummary>>> {
    let removed = SlotRepo::reset(&state.pool).await?;

    Ok(Json(MutationResponse {
        data: ResetSummary { removed },
        notice: Notice::success(
            "Raffle reset. All sold numbers and the draw history were cleared.",
        ),
    }))
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Report an unreadable form body in the standard error envelope.
fn form_rejection(rejection: FormRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}
