use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use tracing::debug;

use crate::engine::bridge::boundary::{
    BoundaryException, BoundaryResult, RuntimeProvider, ScannerRuntime,
};
use crate::engine::bridge::loopback::scanner::LoopbackScanner;
use crate::engine::bridge::loopback::table::LoopbackTable;
use crate::engine::bridge::loopback::CallJournal;
use crate::engine::bridge::memory::SharedArena;

/// Environment hosting loopback scanners, one registered table per class name.
///
/// Clones share the arena, the registry and the journal, so a runtime can act
/// as its own provider.
#[derive(Debug, Clone, Default)]
pub struct LoopbackRuntime {
    arena: SharedArena,
    tables: Arc<HashMap<String, Arc<LoopbackTable>>>,
    journal: CallJournal,
}

impl LoopbackRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `table` as the row source for scanners of `class`.
    pub fn with_table(mut self, class: impl Into<String>, table: LoopbackTable) -> Self {
        Arc::make_mut(&mut self.tables).insert(class.into(), Arc::new(table));
        self
    }

    pub fn arena(&self) -> &SharedArena {
        &self.arena
    }

    pub fn journal(&self) -> &CallJournal {
        &self.journal
    }
}

impl ScannerRuntime for LoopbackRuntime {
    type Handle = LoopbackScanner;
    type Memory = SharedArena;

    fn instantiate(
        &mut self,
        class: &str,
        batch_size: usize,
        params: &HashMap<String, String>,
    ) -> BoundaryResult<LoopbackScanner> {
        let table = self.tables.get(class).cloned().ok_or_else(|| {
            BoundaryException::new("ClassNotFoundException", class.to_string())
        })?;
        debug!(class, batch_size, params = params.len(), "instantiating loopback scanner");
        LoopbackScanner::new(
            self.arena.clone(),
            table,
            batch_size,
            params,
            self.journal.clone(),
        )
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

impl RuntimeProvider for LoopbackRuntime {
    type Runtime = LoopbackRuntime;

    fn acquire(&self) -> BoundaryResult<LoopbackRuntime> {
        Ok(self.clone())
    }
}
