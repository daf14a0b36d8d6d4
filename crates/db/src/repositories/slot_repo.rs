//! Repository for the `slots` table: every raffle ledger operation.
//!
//! Mutations run in a transaction that locks the affected rows with
//! `SELECT ... FOR UPDATE`, hands the observed status to the guards in
//! `raffle_core::ledger`, then writes. The transaction rolls back when it
//! is dropped on an error path, so the pooled connection is always released
//! clean.

use raffle_core::board::{build_board, build_history, HistoryEntry, RaffleBoard};
use raffle_core::error::CoreError;
use raffle_core::ledger::{
    ensure_deletable, ensure_editable, ensure_relocatable, ensure_reservable, pick_winner,
};
use raffle_core::slot::{
    validate_name, validate_number, SlotStatus, SLOT_STATUS_DRAWN, SLOT_STATUS_SOLD,
};
use raffle_core::types::SlotNumber;
use sqlx::PgPool;

use crate::error::{is_unique_violation, LedgerError, LedgerResult};
use crate::models::slot::{CreateSlot, EditSlot, Slot};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "number, holder_name, status_id, drawn_at, created_at, updated_at";

type Tx<'a> = sqlx::Transaction<'a, sqlx::Postgres>;

/// Provides the raffle ledger operations over the `slots` table.
pub struct SlotRepo;

impl SlotRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// List every stored slot, ordered by number.
    pub async fn list(pool: &PgPool) -> Result<Vec<Slot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM slots ORDER BY number");
        sqlx::query_as::<_, Slot>(&query).fetch_all(pool).await
    }

    /// Full board: all 100 numbers plus winner history.
    ///
    /// Built from a single statement, so the grid and history never
    /// disagree with each other.
    pub async fn board(pool: &PgPool) -> LedgerResult<RaffleBoard> {
        let slots = Self::list(pool).await?;
        let snapshots = slots
            .into_iter()
            .map(Slot::into_snapshot)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(build_board(snapshots))
    }

    /// Winner history, most recent first.
    pub async fn history(pool: &PgPool) -> LedgerResult<Vec<HistoryEntry>> {
        let query = format!(
            "SELECT {COLUMNS} FROM slots \
             WHERE status_id = $1 \
             ORDER BY drawn_at DESC, number"
        );
        let slots = sqlx::query_as::<_, Slot>(&query)
            .bind(SLOT_STATUS_DRAWN)
            .fetch_all(pool)
            .await?;
        let snapshots = slots
            .into_iter()
            .map(Slot::into_snapshot)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(build_history(snapshots))
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Reserve a free number for a participant.
    ///
    /// Fails with `NumberTaken` when the number is sold or drawn, including
    /// when a concurrent reservation wins the primary-key race.
    pub async fn reserve(pool: &PgPool, input: &CreateSlot) -> LedgerResult<Slot> {
        let number = validate_number(input.number.into())?;
        let holder_name = validate_name(&input.holder_name)?;

        let mut tx = pool.begin().await?;
        let existing = Self::lock_status(&mut tx, number).await?;
        ensure_reservable(number, existing)?;

        let query = format!(
            "INSERT INTO slots (number, holder_name, status_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let slot = sqlx::query_as::<_, Slot>(&query)
            .bind(number)
            .bind(&holder_name)
            .bind(SLOT_STATUS_SOLD)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| taken_on_conflict(e, number))?;

        tx.commit().await?;
        tracing::info!(number, name = %holder_name, "Number reserved");
        Ok(slot)
    }

    /// Rename a reservation, moving it to `new_number` when that differs.
    ///
    /// Drawn slots are terminal and cannot be edited.
    pub async fn edit(pool: &PgPool, input: &EditSlot) -> LedgerResult<Slot> {
        let old_number = input.old_number;
        let new_number = validate_number(input.new_number.into())?;
        let holder_name = validate_name(&input.holder_name)?;

        let mut tx = pool.begin().await?;
        let existing = Self::lock_status(&mut tx, old_number).await?;
        ensure_editable(old_number, existing)?;

        if new_number != old_number {
            let at_target = Self::lock_status(&mut tx, new_number).await?;
            ensure_relocatable(old_number, new_number, at_target)?;
        }

        let query = format!(
            "UPDATE slots SET number = $2, holder_name = $3 \
             WHERE number = $1 AND status_id = $4 \
             RETURNING {COLUMNS}"
        );
        let slot = sqlx::query_as::<_, Slot>(&query)
            .bind(old_number)
            .bind(new_number)
            .bind(&holder_name)
            .bind(SLOT_STATUS_SOLD)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| taken_on_conflict(e, new_number))?
            .ok_or(CoreError::NotFound { number: old_number })?;

        tx.commit().await?;
        tracing::info!(old_number, new_number, name = %holder_name, "Reservation edited");
        Ok(slot)
    }

    /// Remove a sold reservation, returning the number to available.
    pub async fn delete(pool: &PgPool, number: SlotNumber) -> LedgerResult<()> {
        let mut tx = pool.begin().await?;
        let existing = Self::lock_status(&mut tx, number).await?;
        ensure_deletable(number, existing)?;

        let result = sqlx::query("DELETE FROM slots WHERE number = $1 AND status_id = $2")
            .bind(number)
            .bind(SLOT_STATUS_SOLD)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound { number }.into());
        }

        tx.commit().await?;
        tracing::info!(number, "Reservation deleted");
        Ok(())
    }

    /// Draw a winner uniformly among the currently sold numbers.
    ///
    /// The sold set is locked for the rest of the transaction, so a
    /// concurrent draw or delete waits and then sees the winner as drawn.
    pub async fn draw(pool: &PgPool) -> LedgerResult<Slot> {
        let mut tx = pool.begin().await?;

        let candidates: Vec<SlotNumber> = sqlx::query_scalar(
            "SELECT number FROM slots WHERE status_id = $1 ORDER BY number FOR UPDATE",
        )
        .bind(SLOT_STATUS_SOLD)
        .fetch_all(&mut *tx)
        .await?;

        let winner = *pick_winner(&candidates, &mut rand::rng())?;

        let query = format!(
            "UPDATE slots SET status_id = $2, drawn_at = now() \
             WHERE number = $1 \
             RETURNING {COLUMNS}"
        );
        let slot = sqlx::query_as::<_, Slot>(&query)
            .bind(winner)
            .bind(SLOT_STATUS_DRAWN)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(
            number = slot.number,
            name = %slot.holder_name,
            candidates = candidates.len(),
            "Winner drawn"
        );
        Ok(slot)
    }

    /// Remove every slot, returning all numbers to available.
    ///
    /// Returns the number of rows removed.
    pub async fn reset(pool: &PgPool) -> LedgerResult<u64> {
        let result = sqlx::query("DELETE FROM slots").execute(pool).await?;
        let removed = result.rows_affected();
        tracing::info!(removed, "Raffle reset");
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Lock the row for `number` within `tx` and return its status.
    async fn lock_status(tx: &mut Tx<'_>, number: SlotNumber) -> LedgerResult<Option<SlotStatus>> {
        let status_id: Option<i16> =
            sqlx::query_scalar("SELECT status_id FROM slots WHERE number = $1 FOR UPDATE")
                .bind(number)
                .fetch_optional(&mut **tx)
                .await?;

        status_id
            .map(|id| {
                SlotStatus::from_status_id(id).ok_or_else(|| {
                    CoreError::Internal(format!("slot {number} has unknown status_id {id}"))
                })
            })
            .transpose()
            .map_err(LedgerError::from)
    }
}

/// Translate a primary-key collision on `number` into `NumberTaken`.
fn taken_on_conflict(err: sqlx::Error, number: SlotNumber) -> LedgerError {
    if is_unique_violation(&err) {
        CoreError::NumberTaken {
            number,
            status: SlotStatus::Sold,
        }
        .into()
    } else {
        err.into()
    }
}
