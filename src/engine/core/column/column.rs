use crate::engine::core::column::null_map::NullMap;
use crate::engine::core::column::string_column::StringColumn;
use crate::engine::types::{DataType, Datum, LogicalType};
use crate::shared::datetime::packed::{DateTimeV2Value, DateV2Value};

/// Typed value buffer of a destination column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Int8(Vec<i8>),
    UInt8(Vec<u8>),
    Int16(Vec<i16>),
    UInt16(Vec<u16>),
    Int32(Vec<i32>),
    UInt32(Vec<u32>),
    Int64(Vec<i64>),
    UInt64(Vec<u64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Decimal32(Vec<i32>),
    Decimal64(Vec<i64>),
    Decimal128(Vec<i128>),
    DateV2(Vec<DateV2Value>),
    DateTimeV2(Vec<DateTimeV2Value>),
    String(StringColumn),
    /// Declared by the local type system but never filled by the batch protocol.
    Opaque { logical: LogicalType, rows: usize },
}

impl ColumnValues {
    pub fn for_type(logical: LogicalType) -> Self {
        match logical {
            LogicalType::Int8 => ColumnValues::Int8(Vec::new()),
            LogicalType::UInt8 => ColumnValues::UInt8(Vec::new()),
            LogicalType::Int16 => ColumnValues::Int16(Vec::new()),
            LogicalType::UInt16 => ColumnValues::UInt16(Vec::new()),
            LogicalType::Int32 => ColumnValues::Int32(Vec::new()),
            LogicalType::UInt32 => ColumnValues::UInt32(Vec::new()),
            LogicalType::Int64 => ColumnValues::Int64(Vec::new()),
            LogicalType::UInt64 => ColumnValues::UInt64(Vec::new()),
            LogicalType::Float32 => ColumnValues::Float32(Vec::new()),
            LogicalType::Float64 => ColumnValues::Float64(Vec::new()),
            LogicalType::Decimal32 => ColumnValues::Decimal32(Vec::new()),
            LogicalType::Decimal64 => ColumnValues::Decimal64(Vec::new()),
            LogicalType::Decimal128 | LogicalType::Decimal128I => {
                ColumnValues::Decimal128(Vec::new())
            }
            LogicalType::DateV2 => ColumnValues::DateV2(Vec::new()),
            LogicalType::DateTimeV2 => ColumnValues::DateTimeV2(Vec::new()),
            LogicalType::String | LogicalType::FixedString => {
                ColumnValues::String(StringColumn::new())
            }
            other => ColumnValues::Opaque {
                logical: other,
                rows: 0,
            },
        }
    }

    /// Short name of the buffer layout, used in mismatch diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ColumnValues::Int8(_) => "Int8",
            ColumnValues::UInt8(_) => "UInt8",
            ColumnValues::Int16(_) => "Int16",
            ColumnValues::UInt16(_) => "UInt16",
            ColumnValues::Int32(_) => "Int32",
            ColumnValues::UInt32(_) => "UInt32",
            ColumnValues::Int64(_) => "Int64",
            ColumnValues::UInt64(_) => "UInt64",
            ColumnValues::Float32(_) => "Float32",
            ColumnValues::Float64(_) => "Float64",
            ColumnValues::Decimal32(_) => "Decimal32",
            ColumnValues::Decimal64(_) => "Decimal64",
            ColumnValues::Decimal128(_) => "Decimal128",
            ColumnValues::DateV2(_) => "DateV2",
            ColumnValues::DateTimeV2(_) => "DateTimeV2",
            ColumnValues::String(_) => "String",
            ColumnValues::Opaque { logical, .. } => logical.as_str(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Int8(v) => v.len(),
            ColumnValues::UInt8(v) => v.len(),
            ColumnValues::Int16(v) => v.len(),
            ColumnValues::UInt16(v) => v.len(),
            ColumnValues::Int32(v) | ColumnValues::Decimal32(v) => v.len(),
            ColumnValues::UInt32(v) => v.len(),
            ColumnValues::Int64(v) | ColumnValues::Decimal64(v) => v.len(),
            ColumnValues::UInt64(v) => v.len(),
            ColumnValues::Float32(v) => v.len(),
            ColumnValues::Float64(v) => v.len(),
            ColumnValues::Decimal128(v) => v.len(),
            ColumnValues::DateV2(v) => v.len(),
            ColumnValues::DateTimeV2(v) => v.len(),
            ColumnValues::String(s) => s.len(),
            ColumnValues::Opaque { rows, .. } => *rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored value at `idx`, ignoring nullability.
    pub fn datum_at(&self, idx: usize) -> Option<Datum> {
        match self {
            ColumnValues::Int8(v) => v.get(idx).map(|x| Datum::Int8(*x)),
            ColumnValues::UInt8(v) => v.get(idx).map(|x| Datum::UInt8(*x)),
            ColumnValues::Int16(v) => v.get(idx).map(|x| Datum::Int16(*x)),
            ColumnValues::UInt16(v) => v.get(idx).map(|x| Datum::UInt16(*x)),
            ColumnValues::Int32(v) => v.get(idx).map(|x| Datum::Int32(*x)),
            ColumnValues::UInt32(v) => v.get(idx).map(|x| Datum::UInt32(*x)),
            ColumnValues::Int64(v) => v.get(idx).map(|x| Datum::Int64(*x)),
            ColumnValues::UInt64(v) => v.get(idx).map(|x| Datum::UInt64(*x)),
            ColumnValues::Float32(v) => v.get(idx).map(|x| Datum::Float32(*x)),
            ColumnValues::Float64(v) => v.get(idx).map(|x| Datum::Float64(*x)),
            ColumnValues::Decimal32(v) => v.get(idx).map(|x| Datum::Decimal32(*x)),
            ColumnValues::Decimal64(v) => v.get(idx).map(|x| Datum::Decimal64(*x)),
            ColumnValues::Decimal128(v) => v.get(idx).map(|x| Datum::Decimal128(*x)),
            ColumnValues::DateV2(v) => v.get(idx).map(|x| Datum::DateV2(*x)),
            ColumnValues::DateTimeV2(v) => v.get(idx).map(|x| Datum::DateTimeV2(*x)),
            ColumnValues::String(s) => s.get(idx).map(|b| Datum::Bytes(b.to_vec())),
            ColumnValues::Opaque { .. } => None,
        }
    }
}

/// One destination column: a value buffer plus, when nullable, its null map.
///
/// Rows are only ever appended; the two buffers grow in lock-step on success.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    values: ColumnValues,
    null_map: Option<NullMap>,
}

impl Column {
    pub fn new(data_type: &DataType) -> Self {
        Self {
            values: ColumnValues::for_type(data_type.logical),
            null_map: data_type.nullable.then(NullMap::new),
        }
    }

    pub fn is_nullable(&self) -> bool {
        self.null_map.is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    pub fn null_map(&self) -> Option<&NullMap> {
        self.null_map.as_ref()
    }

    /// Splits a nullable column into its nested values and null map.
    pub fn split_mut(&mut self) -> (&mut ColumnValues, Option<&mut NullMap>) {
        (&mut self.values, self.null_map.as_mut())
    }

    pub fn is_null_at(&self, idx: usize) -> bool {
        self.null_map.as_ref().is_some_and(|nm| nm.is_null(idx))
    }

    /// Logical value at `idx`; `None` for null rows and out-of-range indices.
    pub fn datum_at(&self, idx: usize) -> Option<Datum> {
        if self.is_null_at(idx) {
            return None;
        }
        self.values.datum_at(idx)
    }
}
