//! Responses handed back to the host runtime.

use crate::error::LedgerError;

/// Outcome of one invocation: a status code plus either a payload or an
/// error message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: i32,
    pub message: String,
    pub payload: Vec<u8>,
}

impl Response {
    pub const OK: i32 = 200;
    pub const ERROR: i32 = 500;

    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: Self::OK,
            message: String::new(),
            payload,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Self::ERROR,
            message: message.into(),
            payload: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Self::OK
    }
}

impl From<LedgerError> for Response {
    fn from(err: LedgerError) -> Self {
        Self::error(err.to_string())
    }
}
