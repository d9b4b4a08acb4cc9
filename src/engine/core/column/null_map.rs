/// Per-row null flags, one byte per row; any non-zero byte marks a null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NullMap {
    bytes: Vec<u8>,
}

impl NullMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `flags` verbatim after the existing rows.
    pub fn extend_from_raw(&mut self, flags: &[u8]) {
        self.bytes.extend_from_slice(flags);
    }

    pub fn push(&mut self, is_null: bool) {
        self.bytes.push(is_null as u8);
    }

    #[inline]
    pub fn is_null(&self, idx: usize) -> bool {
        self.bytes.get(idx).is_some_and(|b| *b != 0)
    }

    pub fn null_count(&self) -> usize {
        self.bytes.iter().filter(|b| **b != 0).count()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
