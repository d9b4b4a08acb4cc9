pub const SIZE_I32: usize = 4;

/// Host-order reader over a serialized predicate buffer.
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn has_bytes(&self, n: usize) -> bool {
        self.remaining() >= n
    }

    pub fn read_i32(&mut self) -> Option<i32> {
        let raw = self.read_bytes(SIZE_I32)?;
        Some(i32::from_ne_bytes(raw.try_into().ok()?))
    }

    /// Reads an `i32` that must be a non-negative length or count.
    pub fn read_len(&mut self) -> Option<usize> {
        usize::try_from(self.read_i32()?).ok()
    }

    pub fn read_bytes(&mut self, n: usize) -> Option<&'a [u8]> {
        if !self.has_bytes(n) {
            return None;
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Some(out)
    }
}

pub fn write_i32(out: &mut Vec<u8>, v: i32) {
    out.extend_from_slice(&v.to_ne_bytes());
}

/// Writes a length prefix; lengths beyond `i32::MAX` cannot be encoded.
pub fn write_len(out: &mut Vec<u8>, len: usize) -> Option<()> {
    write_i32(out, i32::try_from(len).ok()?);
    Some(())
}
