pub mod boundary;
pub mod connector;
pub mod decoder;
pub mod loopback;
pub mod memory;
pub mod meta_cursor;
pub mod predicate;
pub mod type_name;

pub use boundary::{BoundaryException, BoundaryResult, RuntimeProvider, ScannerHandle, ScannerRuntime};
pub use connector::{BatchConnector, ConnectorState, NextBlock};
pub use memory::{ForeignMemory, SharedArena};
pub use meta_cursor::MetaCursor;

#[cfg(test)]
mod decoder_test;
