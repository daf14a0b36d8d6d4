//! Slot entity model and DTOs.

use raffle_core::board::SlotSnapshot;
use raffle_core::error::CoreError;
use raffle_core::slot::SlotStatus;
use raffle_core::types::{SlotNumber, Timestamp};
use sqlx::FromRow;

/// A row from the `slots` table.
#[derive(Debug, Clone, FromRow)]
pub struct Slot {
    pub number: SlotNumber,
    pub holder_name: String,
    pub status_id: i16,
    pub drawn_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Slot {
    /// Decode `status_id`, failing on ids the seed data does not define.
    pub fn status(&self) -> Result<SlotStatus, CoreError> {
        SlotStatus::from_status_id(self.status_id).ok_or_else(|| {
            CoreError::Internal(format!(
                "slot {} has unknown status_id {}",
                self.number, self.status_id
            ))
        })
    }

    /// Convert into the projection input used by `raffle_core::board`.
    pub fn into_snapshot(self) -> Result<SlotSnapshot, CoreError> {
        let status = self.status()?;
        Ok(SlotSnapshot {
            number: self.number,
            holder_name: self.holder_name,
            status,
            drawn_at: self.drawn_at,
        })
    }
}

/// DTO for reserving a number.
#[derive(Debug, Clone)]
pub struct CreateSlot {
    pub number: SlotNumber,
    pub holder_name: String,
}

/// DTO for renaming and/or renumbering a reservation.
///
/// When `new_number == old_number` only the name changes.
#[derive(Debug, Clone)]
pub struct EditSlot {
    pub old_number: SlotNumber,
    pub new_number: SlotNumber,
    pub holder_name: String,
}
