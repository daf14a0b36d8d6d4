//! Shared response envelope types for API handlers.
//!
//! Reads use a `{ "data": ... }` envelope. Mutations add a one-shot
//! `notice` the client shows once and discards.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: board }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A single-display message describing the outcome of a mutation.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }
}

/// `{ "data": T, "notice": { ... } }` envelope for mutations.
#[derive(Debug, Serialize)]
pub struct MutationResponse<T: Serialize> {
    pub data: T,
    pub notice: Notice,
}
