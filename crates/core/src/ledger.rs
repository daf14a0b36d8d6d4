//! Ledger transition rules.
//!
//! The persistence layer locks the row(s) an operation touches and passes
//! the status it observed (`None` when no row exists) to one of the
//! `ensure_*` guards before writing. Keeping the rules here means the same
//! state machine is enforced no matter which store drives it:
//!
//! ```text
//! available --reserve--> sold --draw--> drawn (terminal)
//! sold --delete--> available
//! sold --edit(renumber)--> available (old) + sold (new)
//! sold --edit(rename)--> sold
//! * --reset--> available
//! ```

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::CoreError;
use crate::slot::SlotStatus;
use crate::types::SlotNumber;

/// A number can be reserved only when nothing is stored for it.
pub fn ensure_reservable(number: SlotNumber, existing: Option<SlotStatus>) -> Result<(), CoreError> {
    match existing {
        None | Some(SlotStatus::Available) => Ok(()),
        Some(status) => Err(CoreError::NumberTaken { number, status }),
    }
}

/// A number can be deleted only while it is `sold`.
pub fn ensure_deletable(number: SlotNumber, existing: Option<SlotStatus>) -> Result<(), CoreError> {
    ensure_sold(number, existing)
}

/// A reservation can be renamed or renumbered only while it is `sold`.
pub fn ensure_editable(number: SlotNumber, existing: Option<SlotStatus>) -> Result<(), CoreError> {
    ensure_sold(number, existing)
}

/// The target of a renumber must be free unless it is the same number.
pub fn ensure_relocatable(
    old_number: SlotNumber,
    new_number: SlotNumber,
    existing_at_new: Option<SlotStatus>,
) -> Result<(), CoreError> {
    if old_number == new_number {
        return Ok(());
    }
    ensure_reservable(new_number, existing_at_new)
}

fn ensure_sold(number: SlotNumber, existing: Option<SlotStatus>) -> Result<(), CoreError> {
    match existing {
        Some(SlotStatus::Sold) => Ok(()),
        Some(SlotStatus::Drawn) => Err(CoreError::AlreadyDrawn { number }),
        None | Some(SlotStatus::Available) => Err(CoreError::NotFound { number }),
    }
}

/// Pick one candidate uniformly at random.
///
/// Each call is an independent sample over the slice as given; callers pass
/// the current sold set so earlier winners are naturally excluded.
pub fn pick_winner<'a, T, R>(candidates: &'a [T], rng: &mut R) -> Result<&'a T, CoreError>
where
    R: Rng + ?Sized,
{
    candidates.choose(rng).ok_or(CoreError::NoEligibleCandidates)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
