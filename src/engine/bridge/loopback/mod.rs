pub mod encoder;
pub mod runtime;
pub mod scanner;
pub mod table;

pub use runtime::LoopbackRuntime;
pub use scanner::LoopbackScanner;
pub use table::{LoopbackColumn, LoopbackTable, LoopbackTableBuilder};

use std::sync::Arc;

use parking_lot::Mutex;

/// Boundary calls as observed by a scanner, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScannerCall {
    Open,
    GetNextBatchMeta,
    ReleaseColumn(usize),
    ReleaseTable,
    Close,
}

/// Shared, append-only record of boundary calls.
#[derive(Debug, Clone, Default)]
pub struct CallJournal {
    calls: Arc<Mutex<Vec<ScannerCall>>>,
}

impl CallJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: ScannerCall) {
        self.calls.lock().push(call);
    }

    pub fn snapshot(&self) -> Vec<ScannerCall> {
        self.calls.lock().clone()
    }

    pub fn count(&self, call: &ScannerCall) -> usize {
        self.calls.lock().iter().filter(|c| *c == call).count()
    }
}

#[cfg(test)]
mod encoder_test;
