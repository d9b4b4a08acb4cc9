use std::cmp::Ordering;
use std::fmt;

use super::LogicalType;
use super::native::NativeValue;
use crate::shared::datetime::packed::{DateTimeV2Value, DateV2Value};

/// One scalar value in its native batch representation.
///
/// Used for push-down predicate operands and by the loopback producer; decimal
/// variants hold the unscaled integer, the scale lives with the column type.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Decimal32(i32),
    Decimal64(i64),
    Decimal128(i128),
    DateV2(DateV2Value),
    DateTimeV2(DateTimeV2Value),
    Bytes(Vec<u8>),
}

impl Datum {
    pub fn utf8(s: &str) -> Self {
        Datum::Bytes(s.as_bytes().to_vec())
    }

    pub fn logical_type(&self) -> LogicalType {
        match self {
            Datum::Int8(_) => LogicalType::Int8,
            Datum::UInt8(_) => LogicalType::UInt8,
            Datum::Int16(_) => LogicalType::Int16,
            Datum::UInt16(_) => LogicalType::UInt16,
            Datum::Int32(_) => LogicalType::Int32,
            Datum::UInt32(_) => LogicalType::UInt32,
            Datum::Int64(_) => LogicalType::Int64,
            Datum::UInt64(_) => LogicalType::UInt64,
            Datum::Float32(_) => LogicalType::Float32,
            Datum::Float64(_) => LogicalType::Float64,
            Datum::Decimal32(_) => LogicalType::Decimal32,
            Datum::Decimal64(_) => LogicalType::Decimal64,
            Datum::Decimal128(_) => LogicalType::Decimal128I,
            Datum::DateV2(_) => LogicalType::DateV2,
            Datum::DateTimeV2(_) => LogicalType::DateTimeV2,
            Datum::Bytes(_) => LogicalType::String,
        }
    }

    /// Whether this value can be stored in a column of `logical` type.
    pub fn fits(&self, logical: LogicalType) -> bool {
        match (self, logical) {
            (Datum::Bytes(_), l) => l.is_string(),
            (Datum::Decimal128(_), LogicalType::Decimal128 | LogicalType::Decimal128I) => true,
            (d, l) => d.logical_type() == l,
        }
    }

    pub fn write_native(&self, out: &mut Vec<u8>) {
        match self {
            Datum::Int8(v) => v.write_ne(out),
            Datum::UInt8(v) => v.write_ne(out),
            Datum::Int16(v) => v.write_ne(out),
            Datum::UInt16(v) => v.write_ne(out),
            Datum::Int32(v) | Datum::Decimal32(v) => v.write_ne(out),
            Datum::UInt32(v) => v.write_ne(out),
            Datum::Int64(v) | Datum::Decimal64(v) => v.write_ne(out),
            Datum::UInt64(v) => v.write_ne(out),
            Datum::Float32(v) => v.write_ne(out),
            Datum::Float64(v) => v.write_ne(out),
            Datum::Decimal128(v) => v.write_ne(out),
            Datum::DateV2(v) => v.write_ne(out),
            Datum::DateTimeV2(v) => v.write_ne(out),
            Datum::Bytes(b) => out.extend_from_slice(b),
        }
    }

    pub fn native_len(&self) -> usize {
        match self {
            Datum::Bytes(b) => b.len(),
            other => other.logical_type().fixed_width().unwrap_or(0),
        }
    }

    /// Reads a value of `logical` type from its native encoding. Returns `None`
    /// when the width does not match or the type has no scalar encoding.
    pub fn decode_native(logical: LogicalType, bytes: &[u8]) -> Option<Datum> {
        if logical.is_string() {
            return Some(Datum::Bytes(bytes.to_vec()));
        }
        if logical.fixed_width() != Some(bytes.len()) {
            return None;
        }
        let datum = match logical {
            LogicalType::Int8 => Datum::Int8(i8::from_ne_slice(bytes)),
            LogicalType::UInt8 => Datum::UInt8(u8::from_ne_slice(bytes)),
            LogicalType::Int16 => Datum::Int16(i16::from_ne_slice(bytes)),
            LogicalType::UInt16 => Datum::UInt16(u16::from_ne_slice(bytes)),
            LogicalType::Int32 => Datum::Int32(i32::from_ne_slice(bytes)),
            LogicalType::UInt32 => Datum::UInt32(u32::from_ne_slice(bytes)),
            LogicalType::Int64 => Datum::Int64(i64::from_ne_slice(bytes)),
            LogicalType::UInt64 => Datum::UInt64(u64::from_ne_slice(bytes)),
            LogicalType::Float32 => Datum::Float32(f32::from_ne_slice(bytes)),
            LogicalType::Float64 => Datum::Float64(f64::from_ne_slice(bytes)),
            LogicalType::Decimal32 => Datum::Decimal32(i32::from_ne_slice(bytes)),
            LogicalType::Decimal64 => Datum::Decimal64(i64::from_ne_slice(bytes)),
            LogicalType::Decimal128 | LogicalType::Decimal128I => {
                Datum::Decimal128(i128::from_ne_slice(bytes))
            }
            LogicalType::DateV2 => Datum::DateV2(DateV2Value::from_ne_slice(bytes)),
            LogicalType::DateTimeV2 => Datum::DateTimeV2(DateTimeV2Value::from_ne_slice(bytes)),
            _ => return None,
        };
        Some(datum)
    }
}

impl PartialOrd for Datum {
    /// Values of different variants are incomparable.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Datum::Int8(a), Datum::Int8(b)) => a.partial_cmp(b),
            (Datum::UInt8(a), Datum::UInt8(b)) => a.partial_cmp(b),
            (Datum::Int16(a), Datum::Int16(b)) => a.partial_cmp(b),
            (Datum::UInt16(a), Datum::UInt16(b)) => a.partial_cmp(b),
            (Datum::Int32(a), Datum::Int32(b)) => a.partial_cmp(b),
            (Datum::UInt32(a), Datum::UInt32(b)) => a.partial_cmp(b),
            (Datum::Int64(a), Datum::Int64(b)) => a.partial_cmp(b),
            (Datum::UInt64(a), Datum::UInt64(b)) => a.partial_cmp(b),
            (Datum::Float32(a), Datum::Float32(b)) => a.partial_cmp(b),
            (Datum::Float64(a), Datum::Float64(b)) => a.partial_cmp(b),
            (Datum::Decimal32(a), Datum::Decimal32(b)) => a.partial_cmp(b),
            (Datum::Decimal64(a), Datum::Decimal64(b)) => a.partial_cmp(b),
            (Datum::Decimal128(a), Datum::Decimal128(b)) => a.partial_cmp(b),
            (Datum::DateV2(a), Datum::DateV2(b)) => a.0.partial_cmp(&b.0),
            (Datum::DateTimeV2(a), Datum::DateTimeV2(b)) => a.0.partial_cmp(&b.0),
            (Datum::Bytes(a), Datum::Bytes(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Int8(v) => write!(f, "{v}"),
            Datum::UInt8(v) => write!(f, "{v}"),
            Datum::Int16(v) => write!(f, "{v}"),
            Datum::UInt16(v) => write!(f, "{v}"),
            Datum::Int32(v) | Datum::Decimal32(v) => write!(f, "{v}"),
            Datum::UInt32(v) => write!(f, "{v}"),
            Datum::Int64(v) | Datum::Decimal64(v) => write!(f, "{v}"),
            Datum::UInt64(v) => write!(f, "{v}"),
            Datum::Float32(v) => write!(f, "{v}"),
            Datum::Float64(v) => write!(f, "{v}"),
            Datum::Decimal128(v) => write!(f, "{v}"),
            Datum::DateV2(v) => write!(f, "{v}"),
            Datum::DateTimeV2(v) => write!(f, "{v}"),
            Datum::Bytes(b) => write!(f, "{}", String::from_utf8_lossy(b)),
        }
    }
}
