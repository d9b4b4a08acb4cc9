use crate::engine::bridge::loopback::table::LoopbackColumn;
use crate::engine::bridge::memory::SharedArena;
use crate::engine::errors::BridgeError;
use crate::engine::types::native::NativeValue;

/// Arena regions and metadata slots of one encoded column.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EncodedColumn {
    /// Slot values in emission order: null map, then data pointer(s).
    pub slots: Vec<u64>,
    /// Regions to release when the column is freed.
    pub regions: Vec<u64>,
}

impl EncodedColumn {
    /// The zero sentinel for a column the producer cannot emit.
    pub fn unsupported() -> Self {
        Self {
            slots: vec![0],
            regions: Vec::new(),
        }
    }
}

/// Publishes `rows` of `column` in the batch layout.
pub fn encode_column(
    arena: &SharedArena,
    column: &LoopbackColumn,
    rows: &[usize],
) -> Result<EncodedColumn, BridgeError> {
    let logical = column.desc.logical_type();
    let nulls: Vec<u8> = rows
        .iter()
        .map(|r| column.values[*r].is_none() as u8)
        .collect();
    let buffers = if logical.is_string() {
        let mut offsets = Vec::with_capacity(rows.len() * 4);
        let mut data = Vec::new();
        for r in rows {
            if let Some(v) = &column.values[*r] {
                v.write_native(&mut data);
            }
            let end = i32::try_from(data.len()).map_err(|_| {
                BridgeError::InvalidArgument(format!(
                    "string data of column {} exceeds 2 GiB",
                    column.name
                ))
            })?;
            end.write_ne(&mut offsets);
        }
        vec![offsets, data]
    } else {
        let width = logical.fixed_width().ok_or_else(|| {
            BridgeError::UnsupportedType(format!("{} in loopback encoder", logical))
        })?;
        let mut data = Vec::with_capacity(rows.len() * width);
        for r in rows {
            match &column.values[*r] {
                Some(v) => v.write_native(&mut data),
                None => data.resize(data.len() + width, 0),
            }
        }
        vec![data]
    };

    // Nothing is published until every buffer is built.
    let mut out = EncodedColumn::default();
    for buf in std::iter::once(nulls).chain(buffers) {
        let addr = arena.publish(buf);
        out.slots.push(addr);
        out.regions.push(addr);
    }
    Ok(out)
}

/// Publishes the metadata block: row count, then every column's slots.
pub fn encode_meta(arena: &SharedArena, num_rows: usize, columns: &[EncodedColumn]) -> u64 {
    let slot_count = 1 + columns.iter().map(|c| c.slots.len()).sum::<usize>();
    let mut meta = Vec::with_capacity(slot_count * 8);
    (num_rows as i64).write_ne(&mut meta);
    for slot in columns.iter().flat_map(|c| c.slots.iter()) {
        slot.write_ne(&mut meta);
    }
    arena.publish(meta)
}
