use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;

use crate::engine::bridge::boundary::{
    BoundaryException, BoundaryResult, RuntimeProvider, ScannerHandle, ScannerRuntime,
};
use crate::engine::bridge::loopback::{CallJournal, ScannerCall};
use crate::engine::bridge::memory::SharedArena;

/// Boundary call made to raise on the scanner side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Instantiate,
    Open,
    NextBatch,
    ReleaseColumn(usize),
    ReleaseTable,
    Close,
}

/// Runtime whose scanner hands out pre-built metadata blocks in order, then 0.
///
/// Clones share the arena, the journal and the captured parameters, so the
/// runtime doubles as its own provider.
#[derive(Clone, Default)]
pub struct ScriptedRuntime {
    arena: SharedArena,
    batches: Vec<u64>,
    faults: Vec<Fault>,
    env_unavailable: bool,
    journal: CallJournal,
    params: Arc<Mutex<Option<HashMap<String, String>>>>,
    batch_size: Arc<Mutex<Option<usize>>>,
}

impl ScriptedRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arena(mut self, arena: &SharedArena) -> Self {
        self.arena = arena.clone();
        self
    }

    pub fn with_batch(mut self, meta_addr: u64) -> Self {
        self.batches.push(meta_addr);
        self
    }

    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.faults.push(fault);
        self
    }

    pub fn with_unavailable_env(mut self) -> Self {
        self.env_unavailable = true;
        self
    }

    pub fn arena(&self) -> &SharedArena {
        &self.arena
    }

    pub fn journal(&self) -> &CallJournal {
        &self.journal
    }

    /// Parameters the last scanner was constructed with.
    pub fn captured_params(&self) -> Option<HashMap<String, String>> {
        self.params.lock().clone()
    }

    pub fn captured_batch_size(&self) -> Option<usize> {
        *self.batch_size.lock()
    }
}

fn raise(fault: Fault) -> BoundaryException {
    BoundaryException::new("ScriptedException", format!("injected {:?}", fault))
}

impl ScannerRuntime for ScriptedRuntime {
    type Handle = ScriptedScanner;
    type Memory = SharedArena;

    fn instantiate(
        &mut self,
        _class: &str,
        batch_size: usize,
        params: &HashMap<String, String>,
    ) -> BoundaryResult<ScriptedScanner> {
        *self.params.lock() = Some(params.clone());
        *self.batch_size.lock() = Some(batch_size);
        if self.faults.contains(&Fault::Instantiate) {
            return Err(raise(Fault::Instantiate));
        }
        Ok(ScriptedScanner {
            batches: self.batches.iter().copied().collect(),
            faults: self.faults.clone(),
            journal: self.journal.clone(),
        })
    }

    fn memory(&self) -> &SharedArena {
        &self.arena
    }

    fn expose(&mut self, bytes: Bytes) -> BoundaryResult<u64> {
        Ok(self.arena.publish(bytes))
    }

    fn revoke(&mut self, addr: u64) {
        self.arena.release(addr);
    }
}

impl RuntimeProvider for ScriptedRuntime {
    type Runtime = ScriptedRuntime;

    fn acquire(&self) -> BoundaryResult<ScriptedRuntime> {
        if self.env_unavailable {
            return Err(BoundaryException::new(
                "EnvironmentError",
                "no execution environment attached",
            ));
        }
        Ok(self.clone())
    }
}

pub struct ScriptedScanner {
    batches: VecDeque<u64>,
    faults: Vec<Fault>,
    journal: CallJournal,
}

impl ScriptedScanner {
    fn call(&self, call: ScannerCall, fault: Fault) -> BoundaryResult<()> {
        self.journal.record(call);
        if self.faults.contains(&fault) {
            return Err(raise(fault));
        }
        Ok(())
    }
}

impl ScannerHandle for ScriptedScanner {
    fn open(&mut self) -> BoundaryResult<()> {
        self.call(ScannerCall::Open, Fault::Open)
    }

    fn get_next_batch_meta(&mut self) -> BoundaryResult<u64> {
        self.call(ScannerCall::GetNextBatchMeta, Fault::NextBatch)?;
        Ok(self.batches.pop_front().unwrap_or(0))
    }

    fn release_column(&mut self, column_index: usize) -> BoundaryResult<()> {
        self.call(
            ScannerCall::ReleaseColumn(column_index),
            Fault::ReleaseColumn(column_index),
        )
    }

    fn release_table(&mut self) -> BoundaryResult<()> {
        self.call(ScannerCall::ReleaseTable, Fault::ReleaseTable)
    }

    fn close(&mut self) -> BoundaryResult<()> {
        self.call(ScannerCall::Close, Fault::Close)
    }
}
