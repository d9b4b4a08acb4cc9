use crate::engine::bridge::memory::SharedArena;
use crate::engine::types::native::NativeValue;

/// Lays out a batch metadata block and its column buffers in an arena.
pub struct MetaBlockFactory {
    arena: SharedArena,
    rows: i64,
    slots: Vec<u64>,
}

impl MetaBlockFactory {
    pub fn new(arena: &SharedArena) -> Self {
        Self {
            arena: arena.clone(),
            rows: 0,
            slots: Vec::new(),
        }
    }

    pub fn with_rows(mut self, rows: i64) -> Self {
        self.rows = rows;
        self
    }

    /// Fixed-width column; `nulls` of `None` publishes an all-valid map.
    pub fn with_fixed_column<T: NativeValue>(mut self, nulls: Option<Vec<u8>>, values: &[T]) -> Self {
        let nulls = nulls.unwrap_or_else(|| vec![0u8; values.len()]);
        let mut data = Vec::with_capacity(values.len() * T::WIDTH);
        for v in values {
            v.write_ne(&mut data);
        }
        let null_addr = self.arena.publish(nulls);
        let data_addr = self.arena.publish(data);
        self.slots.extend([null_addr, data_addr]);
        self
    }

    pub fn with_string_column(mut self, nulls: Option<Vec<u8>>, offsets: &[i32], data: &[u8]) -> Self {
        let nulls = nulls.unwrap_or_else(|| vec![0u8; offsets.len()]);
        let mut raw_offsets = Vec::with_capacity(offsets.len() * 4);
        for o in offsets {
            o.write_ne(&mut raw_offsets);
        }
        let null_addr = self.arena.publish(nulls);
        let offsets_addr = self.arena.publish(raw_offsets);
        let data_addr = self.arena.publish(data.to_vec());
        self.slots.extend([null_addr, offsets_addr, data_addr]);
        self
    }

    /// The producer's zero sentinel for a type it cannot emit.
    pub fn with_unsupported_column(mut self) -> Self {
        self.slots.push(0);
        self
    }

    pub fn with_raw_slot(mut self, slot: u64) -> Self {
        self.slots.push(slot);
        self
    }

    /// Publishes the block and returns its address.
    pub fn build(self) -> u64 {
        let mut meta = Vec::with_capacity((self.slots.len() + 1) * 8);
        self.rows.write_ne(&mut meta);
        for slot in self.slots {
            slot.write_ne(&mut meta);
        }
        self.arena.publish(meta)
    }
}
