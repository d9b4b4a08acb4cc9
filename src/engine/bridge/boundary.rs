use std::collections::HashMap;

use bytes::Bytes;
use thiserror::Error;

use crate::engine::bridge::memory::ForeignMemory;

/// An exception raised on the scanner side.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{class}: {message}")]
pub struct BoundaryException {
    pub class: String,
    pub message: String,
}

impl BoundaryException {
    pub fn new(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            message: message.into(),
        }
    }
}

pub type BoundaryResult<T> = Result<T, BoundaryException>;

/// One scanner instance with its resolved method table.
///
/// Every call returns a `BoundaryResult`, so a raise on the far side is
/// observed right after the call that caused it.
pub trait ScannerHandle {
    fn open(&mut self) -> BoundaryResult<()>;

    /// Address of the next batch metadata block, `0` once exhausted.
    fn get_next_batch_meta(&mut self) -> BoundaryResult<u64>;

    /// Frees one column of the current batch. Idempotent per index.
    fn release_column(&mut self, column_index: usize) -> BoundaryResult<()>;

    /// Frees the current batch as a whole. Idempotent.
    fn release_table(&mut self) -> BoundaryResult<()>;

    fn close(&mut self) -> BoundaryResult<()>;
}

/// Execution environment of one connector.
pub trait ScannerRuntime {
    type Handle: ScannerHandle;
    type Memory: ForeignMemory;

    /// Constructs `class` with `(batch_size, params)` and resolves its methods.
    fn instantiate(
        &mut self,
        class: &str,
        batch_size: usize,
        params: &HashMap<String, String>,
    ) -> BoundaryResult<Self::Handle>;

    /// Memory the metadata blocks and column buffers live in.
    fn memory(&self) -> &Self::Memory;

    /// Makes a local buffer addressable by the scanner until `revoke`.
    fn expose(&mut self, bytes: Bytes) -> BoundaryResult<u64>;

    fn revoke(&mut self, addr: u64);
}

/// Hands out an environment; one call per connector `open`.
pub trait RuntimeProvider {
    type Runtime: ScannerRuntime;

    fn acquire(&self) -> BoundaryResult<Self::Runtime>;
}
