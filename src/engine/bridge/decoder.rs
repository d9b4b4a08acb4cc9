use tracing::trace;

use crate::engine::bridge::memory::ForeignMemory;
use crate::engine::bridge::meta_cursor::MetaCursor;
use crate::engine::core::column::{Column, ColumnValues, StringColumn};
use crate::engine::errors::BridgeError;
use crate::engine::types::LogicalType;
use crate::engine::types::native::{NativeValue, extend_from_ne_bytes};

/// Width of one entry in a string column's offsets buffer.
const STRING_OFFSET_WIDTH: usize = 4;

/// Appends `num_rows` rows of `logical` type to `column`, consuming exactly the
/// slots that type occupies in the metadata block.
///
/// The null-map slot is read for every column. A zero there is the producer's
/// marker for a type it cannot emit and stops the decode before any further
/// slot of this column is touched. On error the column may hold a partial
/// append; the batch is discarded by the caller.
pub fn fill_column<M: ForeignMemory + ?Sized>(
    column: &mut Column,
    logical: LogicalType,
    num_rows: usize,
    cursor: &mut MetaCursor<'_, M>,
) -> Result<(), BridgeError> {
    let null_map_addr = cursor.next_as_pointer()?;
    if null_map_addr == 0 {
        return Err(BridgeError::UnsupportedByScanner(logical.to_string()));
    }

    let (values, null_map) = column.split_mut();
    if let Some(null_map) = null_map {
        let flags = cursor.memory().read(null_map_addr, num_rows)?;
        null_map.extend_from_raw(&flags);
    }

    trace!(%logical, num_rows, "filling column");
    match (logical, values) {
        (LogicalType::Int8, ColumnValues::Int8(v)) => fill_fixed(v, num_rows, cursor),
        (LogicalType::UInt8, ColumnValues::UInt8(v)) => fill_fixed(v, num_rows, cursor),
        (LogicalType::Int16, ColumnValues::Int16(v)) => fill_fixed(v, num_rows, cursor),
        (LogicalType::UInt16, ColumnValues::UInt16(v)) => fill_fixed(v, num_rows, cursor),
        (LogicalType::Int32, ColumnValues::Int32(v)) => fill_fixed(v, num_rows, cursor),
        (LogicalType::UInt32, ColumnValues::UInt32(v)) => fill_fixed(v, num_rows, cursor),
        (LogicalType::Int64, ColumnValues::Int64(v)) => fill_fixed(v, num_rows, cursor),
        (LogicalType::UInt64, ColumnValues::UInt64(v)) => fill_fixed(v, num_rows, cursor),
        (LogicalType::Float32, ColumnValues::Float32(v)) => fill_fixed(v, num_rows, cursor),
        (LogicalType::Float64, ColumnValues::Float64(v)) => fill_fixed(v, num_rows, cursor),
        (LogicalType::Decimal32, ColumnValues::Decimal32(v)) => fill_fixed(v, num_rows, cursor),
        (LogicalType::Decimal64, ColumnValues::Decimal64(v)) => fill_fixed(v, num_rows, cursor),
        (
            LogicalType::Decimal128 | LogicalType::Decimal128I,
            ColumnValues::Decimal128(v),
        ) => fill_fixed(v, num_rows, cursor),
        (LogicalType::DateV2, ColumnValues::DateV2(v)) => fill_fixed(v, num_rows, cursor),
        (LogicalType::DateTimeV2, ColumnValues::DateTimeV2(v)) => {
            fill_fixed(v, num_rows, cursor)
        }
        (LogicalType::String | LogicalType::FixedString, ColumnValues::String(s)) => {
            fill_strings(s, num_rows, cursor)
        }
        (logical, values) if logical.is_transferable() => {
            Err(BridgeError::ColumnTypeMismatch {
                column: String::new(),
                declared: logical.to_string(),
                actual: values.kind().to_string(),
            })
        }
        (logical, _) => Err(BridgeError::UnsupportedType(logical.to_string())),
    }
}

fn fill_fixed<T: NativeValue, M: ForeignMemory + ?Sized>(
    dst: &mut Vec<T>,
    num_rows: usize,
    cursor: &mut MetaCursor<'_, M>,
) -> Result<(), BridgeError> {
    let addr = cursor.next_as_pointer()?;
    let len = num_rows
        .checked_mul(T::WIDTH)
        .ok_or_else(|| BridgeError::CorruptMeta("fixed-width buffer size overflow".into()))?;
    let raw = cursor.memory().read(addr, len)?;
    extend_from_ne_bytes(dst, &raw);
    Ok(())
}

/// Reads the offsets and byte buffers, then appends one view per row. Row `i`
/// spans `[offsets[i-1], offsets[i])` with an implicit leading zero.
fn fill_strings<M: ForeignMemory + ?Sized>(
    dst: &mut StringColumn,
    num_rows: usize,
    cursor: &mut MetaCursor<'_, M>,
) -> Result<(), BridgeError> {
    let offsets_addr = cursor.next_as_pointer()?;
    let data_addr = cursor.next_as_pointer()?;

    let len = num_rows
        .checked_mul(STRING_OFFSET_WIDTH)
        .ok_or_else(|| BridgeError::CorruptMeta("string offsets size overflow".into()))?;
    let raw_offsets = cursor.memory().read(offsets_addr, len)?;
    let mut ends: Vec<i32> = Vec::with_capacity(num_rows);
    extend_from_ne_bytes(&mut ends, &raw_offsets);

    let mut spans = Vec::with_capacity(num_rows);
    let mut start = 0usize;
    for (row, end) in ends.iter().enumerate() {
        let end = usize::try_from(*end)
            .ok()
            .filter(|end| *end >= start)
            .ok_or_else(|| {
                BridgeError::CorruptMeta(format!(
                    "string offset {end} at row {row} precedes {start}"
                ))
            })?;
        spans.push((start, end));
        start = end;
    }

    let data = cursor.memory().read(data_addr, start)?;
    let views: Vec<&[u8]> = spans.iter().map(|(s, e)| &data[*s..*e]).collect();
    dst.insert_many_strings(&views);
    Ok(())
}
