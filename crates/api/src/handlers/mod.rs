//! Request handlers.
//!
//! Handlers parse form input, delegate to the repositories in `raffle_db`
//! and map errors via [`crate::error::AppError`].

pub mod raffle;
