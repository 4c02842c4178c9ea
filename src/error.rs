//! Ledger error types.

use crate::dispatch::Arity;
use crate::store::StoreError;
use thiserror::Error;

/// Errors returned by ledger operations.
///
/// Every variant is terminal for the invocation that raised it; the host
/// runtime decides whether to retry the whole transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The underlying state store failed
    #[error(transparent)]
    StoreAccess(#[from] StoreError),

    #[error("vehicle id already exists: {id}")]
    DuplicateKey { id: String },

    #[error("vehicle id does not exist: {id}")]
    UnknownKey { id: String },

    #[error("malformed vehicle record: {reason}")]
    MalformedRecord { reason: String },

    #[error("incorrect number of arguments for {operation}: expecting {expected}, got {found}")]
    BadArity {
        operation: &'static str,
        expected: Arity,
        found: usize,
    },

    #[error("invalid argument for {operation}: {reason}")]
    InvalidArgument {
        operation: &'static str,
        reason: String,
    },

    #[error("received unknown function invocation: {name}")]
    UnknownOperation { name: String },
}

impl LedgerError {
    /// Stable kind identifier for logs and responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StoreAccess(_) => "STORE_ACCESS",
            Self::DuplicateKey { .. } => "DUPLICATE_KEY",
            Self::UnknownKey { .. } => "UNKNOWN_KEY",
            Self::MalformedRecord { .. } => "MALFORMED_RECORD",
            Self::BadArity { .. } => "BAD_ARITY",
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::UnknownOperation { .. } => "UNKNOWN_OPERATION",
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
