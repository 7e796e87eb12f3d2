use thiserror::Error;

/// The probe could not be attempted at all. Transport-level failures of an
/// attempted probe are not errors; they classify as
/// [`Classification::Failure`](super::Classification::Failure).
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("target URL could not be probed: {0}")]
    InvalidTarget(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("timestamp {0} is not representable in the storage backend")]
    TimestampOutOfRange(i64),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid query parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Everything a series query can fail with.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
