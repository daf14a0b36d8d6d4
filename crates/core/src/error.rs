use crate::slot::SlotStatus;
use crate::types::SlotNumber;

/// Domain errors raised by the raffle ledger rules.
///
/// Storage failures are not represented here; the persistence layer wraps
/// this type and adds its own variant for them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Name must not be empty")]
    InvalidName,

    #[error("Number {number} is already {status}")]
    NumberTaken {
        number: SlotNumber,
        status: SlotStatus,
    },

    #[error("Number {number} has no reservation")]
    NotFound { number: SlotNumber },

    #[error("Number {number} has already been drawn and cannot be changed")]
    AlreadyDrawn { number: SlotNumber },

    #[error("There are no sold numbers left to draw")]
    NoEligibleCandidates,

    #[error("Internal error: {0}")]
    Internal(String),
}
