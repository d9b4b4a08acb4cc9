/// Variable-width strings stored as one byte arena plus cumulative end offsets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringColumn {
    chars: Vec<u8>,
    offsets: Vec<usize>,
}

impl StringColumn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, value: &[u8]) {
        self.chars.extend_from_slice(value);
        self.offsets.push(self.chars.len());
    }

    /// Appends every view in one pass, reserving the arena up front.
    pub fn insert_many_strings(&mut self, values: &[&[u8]]) {
        let total: usize = values.iter().map(|v| v.len()).sum();
        self.chars.reserve(total);
        self.offsets.reserve(values.len());
        for value in values {
            self.insert(value);
        }
    }

    pub fn get(&self, idx: usize) -> Option<&[u8]> {
        let end = *self.offsets.get(idx)?;
        let start = if idx == 0 { 0 } else { self.offsets[idx - 1] };
        Some(&self.chars[start..end])
    }

    pub fn get_str(&self, idx: usize) -> Option<&str> {
        self.get(idx).and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn byte_len(&self) -> usize {
        self.chars.len()
    }
}
