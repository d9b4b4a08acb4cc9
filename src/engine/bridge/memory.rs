use std::collections::BTreeMap;
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::RwLock;

use crate::engine::errors::MemoryError;

/// Read access to memory owned by the scanner side.
///
/// Every read names an address and an explicit length and is resolved against
/// what the implementation knows to be mapped, so a layout disagreement
/// surfaces as a `MemoryError` rather than a stray dereference.
pub trait ForeignMemory {
    fn read(&self, addr: u64, len: usize) -> Result<Bytes, MemoryError>;
}

const ARENA_BASE: u64 = 0x1_0000;
const REGION_ALIGN: u64 = 16;
/// Unmapped gap after every region so an over-read never lands in a neighbour.
const GUARD_BYTES: u64 = 64;

#[inline]
fn align_up(off: u64, align: u64) -> u64 {
    let rem = off % align;
    if rem == 0 { off } else { off + (align - rem) }
}

/// In-process address space shared by a producer and the connector.
///
/// Regions are published as immutable `Bytes`, addressed by a synthetic
/// non-zero base, and become unreadable once released.
#[derive(Debug, Clone)]
pub struct SharedArena {
    inner: Arc<RwLock<ArenaInner>>,
}

#[derive(Debug)]
struct ArenaInner {
    regions: BTreeMap<u64, Bytes>,
    next: u64,
}

impl Default for SharedArena {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedArena {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ArenaInner {
                regions: BTreeMap::new(),
                next: ARENA_BASE,
            })),
        }
    }

    /// Maps `bytes` and returns its base address.
    pub fn publish(&self, bytes: impl Into<Bytes>) -> u64 {
        let bytes = bytes.into();
        let mut inner = self.inner.write();
        let addr = inner.next;
        inner.next = align_up(addr + bytes.len() as u64 + GUARD_BYTES, REGION_ALIGN);
        inner.regions.insert(addr, bytes);
        addr
    }

    /// Unmaps the region based at `addr`; false if nothing was mapped there.
    pub fn release(&self, addr: u64) -> bool {
        self.inner.write().regions.remove(&addr).is_some()
    }

    pub fn is_live(&self, addr: u64) -> bool {
        self.inner.read().regions.contains_key(&addr)
    }

    pub fn live_regions(&self) -> usize {
        self.inner.read().regions.len()
    }

    /// Everything from `addr` to the end of its region.
    pub fn read_to_end(&self, addr: u64) -> Result<Bytes, MemoryError> {
        let inner = self.inner.read();
        let (base, region) = Self::locate(&inner, addr, 0)?;
        Ok(region.slice((addr - base) as usize..))
    }

    fn locate<'a>(
        inner: &'a ArenaInner,
        addr: u64,
        len: usize,
    ) -> Result<(u64, &'a Bytes), MemoryError> {
        if addr == 0 {
            return Err(MemoryError::Null);
        }
        let (base, region) = inner
            .regions
            .range(..=addr)
            .next_back()
            .ok_or(MemoryError::Unmapped { addr, len })?;
        let region_end = base + region.len() as u64;
        if addr > region_end {
            return Err(MemoryError::Unmapped { addr, len });
        }
        let end = addr
            .checked_add(len as u64)
            .ok_or(MemoryError::Overflow(addr))?;
        if end > region_end {
            return Err(MemoryError::OutOfBounds {
                addr,
                len,
                end: region_end,
            });
        }
        Ok((*base, region))
    }
}

impl ForeignMemory for SharedArena {
    fn read(&self, addr: u64, len: usize) -> Result<Bytes, MemoryError> {
        let inner = self.inner.read();
        let (base, region) = Self::locate(&inner, addr, len)?;
        let start = (addr - base) as usize;
        Ok(region.slice(start..start + len))
    }
}
