use thiserror::Error;
use tracing::{debug, error};

use crate::engine::bridge::boundary::BoundaryException;
use crate::engine::core::BlockError;

/// Errors raised while moving batches across the scanner boundary.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Scanner raised {0}")]
    Boundary(#[from] BoundaryException),

    /// The producer emitted the zero sentinel for a column type it cannot produce.
    #[error("Unsupported type {0} in scanner")]
    UnsupportedByScanner(String),

    #[error("Unsupported type {0} in batch connector")]
    UnsupportedType(String),

    #[error("Failed to acquire scanner environment: {0}")]
    EnvUnavailable(String),

    /// Release or close raised on the scanner side; the foreign handle is in an
    /// indeterminate state and must not be used again.
    #[error("Failed to release scanner resource: {0}")]
    ReleaseFailed(String),

    #[error("Batch memory read failed: {0}")]
    Memory(#[from] MemoryError),

    #[error("Corrupt batch metadata: {0}")]
    CorruptMeta(String),

    #[error("Corrupt predicate buffer: {0}")]
    CorruptPredicate(String),

    #[error("Destination block error: {0}")]
    Block(#[from] BlockError),

    #[error("Column {column} declared as {declared} but destination holds {actual}")]
    ColumnTypeMismatch {
        column: String,
        declared: String,
        actual: String,
    },

    #[error("Invalid connector state: {0}")]
    InvalidState(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl BridgeError {
    /// Only a failed release is unrecoverable; everything else fails the batch
    /// or the scan and leaves the decision to the caller.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BridgeError::ReleaseFailed(_))
    }

    /// Names the destination column on errors raised below the block level.
    pub fn with_column(self, name: &str) -> Self {
        match self {
            BridgeError::ColumnTypeMismatch {
                declared, actual, ..
            } => BridgeError::ColumnTypeMismatch {
                column: name.to_string(),
                declared,
                actual,
            },
            other => other,
        }
    }

    pub fn log_error(&self) {
        match self {
            BridgeError::Boundary(e) => {
                error!("Scanner raised an exception: {}", e);
                debug!("Boundary exception details: {:?}", e);
            }
            BridgeError::UnsupportedByScanner(t) | BridgeError::UnsupportedType(t) => {
                error!("{}", self);
                debug!("Unsupported type details: {}", t);
            }
            BridgeError::EnvUnavailable(e) => {
                error!("Scanner environment unavailable: {}", e);
            }
            BridgeError::ReleaseFailed(e) => {
                error!("Failed to release scanner resource: {}", e);
                debug!("Scanner handle left in an indeterminate state");
            }
            BridgeError::Memory(e) => {
                error!("Batch memory read failed: {}", e);
                debug!("Memory error details: {:?}", e);
            }
            BridgeError::Block(e) => {
                error!("Destination block error: {}", e);
                debug!("Block error details: {:?}", e);
            }
            other => {
                error!("{}", other);
                debug!("Bridge error details: {:?}", other);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("null address")]
    Null,

    #[error("address {addr:#x} (+{len} bytes) is not mapped")]
    Unmapped { addr: u64, len: usize },

    #[error("read of {len} bytes at {addr:#x} overruns region ending at {end:#x}")]
    OutOfBounds { addr: u64, len: usize, end: u64 },

    #[error("address arithmetic overflow at {0:#x}")]
    Overflow(u64),
}
