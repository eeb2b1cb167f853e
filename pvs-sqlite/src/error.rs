use pvs_core::models::ValidationError;
use thiserror::Error;

/// Unified error type for repository operations.
///
/// Validation and conflict are raised before the write that would violate
/// them; storage errors are propagated unchanged. Nothing is retried or
/// swallowed here, and a failure after a partial write leaves the aggregate
/// fragmented unless the caller wrapped the operation in a transaction.
#[derive(Debug, Error)]
pub enum Error {
    /// An aggregate invariant was violated; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A uniqueness constraint would be violated; nothing was written.
    #[error("conflict: {0}")]
    Conflict(String),

    /// An update addressed a variant row that does not exist.
    #[error("product variant not found")]
    NotFound,

    /// Error from SQLite operations.
    #[error("sql error: {0}")]
    Sql(#[from] sqlx::Error),

    /// Error during database migrations.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
