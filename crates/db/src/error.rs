use raffle_core::error::CoreError;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Error returned by every ledger operation in [`crate::repositories::SlotRepo`].
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A ledger rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store could not be reached or the transaction failed.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] sqlx::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Whether `err` is a primary-key or unique-constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}
