use thiserror::Error;

/// Errors surfaced by mutating operations.
///
/// Validation variants reject the operation with no side effect. `NotFound`
/// is returned when a mutation targets an id that no longer exists; read
/// side lookups return `Option` instead and never fail. Corrupt persisted
/// data never reaches this type: the storage adapter degrades it to empty
/// collections at load time.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("subject '{0}' does not exist")]
    UnknownSubject(String),

    #[error("end date must not be before start date")]
    InvalidDateRange,

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("no {kind} with id '{id}'")]
    NotFound { kind: &'static str, id: String },

    #[error("storage failure: {0}")]
    Storage(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
