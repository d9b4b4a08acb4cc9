use tracing::trace;

use crate::engine::bridge::memory::ForeignMemory;
use crate::engine::errors::BridgeError;

/// Width of one metadata slot.
pub const SLOT_WIDTH: usize = 8;

/// Sequential reader over a batch metadata block.
///
/// The block carries no length; the caller reads exactly the slots the
/// declared schema implies (one count, then per column a null-map pointer and
/// one or two data pointers).
pub struct MetaCursor<'m, M: ForeignMemory + ?Sized> {
    memory: &'m M,
    base: u64,
    offset: u64,
}

impl<'m, M: ForeignMemory + ?Sized> MetaCursor<'m, M> {
    pub fn new(memory: &'m M) -> Self {
        Self {
            memory,
            base: 0,
            offset: 0,
        }
    }

    /// Points the cursor at the start of a new block.
    pub fn set(&mut self, base: u64) {
        self.base = base;
        self.offset = 0;
    }

    pub fn memory(&self) -> &'m M {
        self.memory
    }

    pub fn slots_read(&self) -> usize {
        (self.offset / SLOT_WIDTH as u64) as usize
    }

    fn next_slot(&mut self) -> Result<[u8; SLOT_WIDTH], BridgeError> {
        if self.base == 0 {
            return Err(BridgeError::CorruptMeta(
                "cursor read before a block was set".into(),
            ));
        }
        let addr = self
            .base
            .checked_add(self.offset)
            .ok_or_else(|| BridgeError::CorruptMeta("slot address overflow".into()))?;
        let raw = self.memory.read(addr, SLOT_WIDTH)?;
        let mut slot = [0u8; SLOT_WIDTH];
        slot.copy_from_slice(&raw);
        self.offset += SLOT_WIDTH as u64;
        Ok(slot)
    }

    /// Next slot as a row count.
    pub fn next_as_count(&mut self) -> Result<usize, BridgeError> {
        let value = i64::from_ne_bytes(self.next_slot()?);
        trace!(slot = self.slots_read() - 1, value, "meta count");
        usize::try_from(value)
            .map_err(|_| BridgeError::CorruptMeta(format!("negative row count {value}")))
    }

    /// Next slot as an address; zero is returned as-is.
    pub fn next_as_pointer(&mut self) -> Result<u64, BridgeError> {
        let value = u64::from_ne_bytes(self.next_slot()?);
        trace!(slot = self.slots_read() - 1, addr = value, "meta pointer");
        Ok(value)
    }
}
