//! Slot numbering, status ids and input validation.
//!
//! The status ids must match the seed data in
//! `20260301000001_create_slots_table.sql`. `Available` is never stored:
//! a number without a row is available.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::SlotNumber;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lowest number on the board.
pub const MIN_NUMBER: SlotNumber = 1;

/// Highest number on the board.
pub const MAX_NUMBER: SlotNumber = 100;

/// Number of cells on the board.
pub const BOARD_SIZE: usize = (MAX_NUMBER - MIN_NUMBER + 1) as usize;

/// Slot reserved by a participant and eligible for drawing.
pub const SLOT_STATUS_SOLD: i16 = 1;

/// Slot selected as a winner. Terminal until reset.
pub const SLOT_STATUS_DRAWN: i16 = 2;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Current state of a raffle number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Available,
    Sold,
    Drawn,
}

impl SlotStatus {
    /// Map a `slot_statuses.id` to a status. Unknown ids yield `None`.
    pub fn from_status_id(id: i16) -> Option<Self> {
        match id {
            SLOT_STATUS_SOLD => Some(Self::Sold),
            SLOT_STATUS_DRAWN => Some(Self::Drawn),
            _ => None,
        }
    }

    /// The stored id for this status, `None` for `Available`.
    pub fn status_id(self) -> Option<i16> {
        match self {
            Self::Available => None,
            Self::Sold => Some(SLOT_STATUS_SOLD),
            Self::Drawn => Some(SLOT_STATUS_DRAWN),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Sold => "sold",
            Self::Drawn => "drawn",
        }
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check that `number` lies on the board.
pub fn validate_number(number: i64) -> Result<SlotNumber, CoreError> {
    if (i64::from(MIN_NUMBER)..=i64::from(MAX_NUMBER)).contains(&number) {
        // In range, so the narrowing cannot truncate.
        Ok(number as SlotNumber)
    } else {
        Err(CoreError::InvalidNumber(format!(
            "{number} is outside {MIN_NUMBER}..={MAX_NUMBER}"
        )))
    }
}

/// Parse a raw form or path value into a board number.
///
/// Surrounding whitespace is ignored. Anything that is not an integer, or an
/// integer off the board, is `InvalidNumber`.
pub fn parse_number(raw: &str) -> Result<SlotNumber, CoreError> {
    let trimmed = raw.trim();
    let number: i64 = trimmed
        .parse()
        .map_err(|_| CoreError::InvalidNumber(format!("'{trimmed}' is not an integer")))?;
    validate_number(number)
}

/// Trim a holder name, rejecting names that are empty afterwards.
pub fn validate_name(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidName);
    }
    Ok(trimmed.to_string())
}

/// Iterate every number on the board in ascending order.
pub fn all_numbers() -> impl Iterator<Item = SlotNumber> {
    MIN_NUMBER..=MAX_NUMBER
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
