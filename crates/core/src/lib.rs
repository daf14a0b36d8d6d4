//! Raffle domain logic.
//!
//! Everything in this crate is pure: slot numbering and validation, the
//! per-slot transition rules, uniform winner selection and the projection
//! from stored slots to the 100-cell board. Persistence lives in
//! `raffle_db`, HTTP in `raffle_api`.

pub mod board;
pub mod error;
pub mod ledger;
pub mod slot;
pub mod types;
