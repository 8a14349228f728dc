//! Wire-serializable RPC error codes.
//!
//! Translates the Store's [`StorageError`] classification into a code a
//! client on the other side of the socket can match on without depending on
//! `beads-storage` itself.

use serde::{Deserialize, Serialize};

use beads_storage::StorageError;

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct RpcError {
    pub code: RpcErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RpcErrorCode {
    NotFound,
    Ambiguous,
    Conflict,
    IdInUse,
    Locked,
    Malformed,
    Corrupt,
    Cancelled,
    Internal,
}

impl RpcErrorCode {
    /// `true` for transient errors worth retrying with backoff.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Locked)
    }
}

impl From<&StorageError> for RpcErrorCode {
    fn from(err: &StorageError) -> Self {
        match err {
            StorageError::NotFound { .. } => Self::NotFound,
            StorageError::Conflict(_) | StorageError::CycleDetected | StorageError::AlreadyClaimed { .. } => {
                Self::Conflict
            }
            StorageError::IdInUse(_) => Self::IdInUse,
            StorageError::DatabaseLocked(_) | StorageError::Connection(_) | StorageError::Transaction(_) => {
                Self::Locked
            }
            StorageError::Corrupt(_) | StorageError::Migration { .. } | StorageError::NotInitialized { .. } => {
                Self::Corrupt
            }
            StorageError::Validation { .. } | StorageError::PrefixMismatch { .. } => Self::Malformed,
            StorageError::Query(_) | StorageError::Serialization(_) | StorageError::Internal(_) => {
                Self::Internal
            }
        }
    }
}

impl From<StorageError> for RpcError {
    fn from(err: StorageError) -> Self {
        let code = RpcErrorCode::from(&err);
        match code {
            RpcErrorCode::Locked => tracing::warn!(error = %err, "retryable storage error"),
            _ => tracing::error!(error = %err, "storage error"),
        }
        RpcError {
            code,
            message: err.to_string(),
        }
    }
}

impl RpcError {
    pub fn ambiguous(prefix: &str, matches: &[String]) -> Self {
        Self {
            code: RpcErrorCode::Ambiguous,
            message: format!("prefix {prefix} matches {} issues: {}", matches.len(), matches.join(", ")),
        }
    }

    pub fn not_found(id: &str) -> Self {
        Self {
            code: RpcErrorCode::NotFound,
            message: format!("issue not found: {id}"),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            code: RpcErrorCode::Malformed,
            message: message.into(),
        }
    }
}
