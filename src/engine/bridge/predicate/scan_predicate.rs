use std::cmp::Ordering;
use std::fmt;

use crate::engine::bridge::predicate::wire::{SIZE_I32, WireReader, write_i32, write_len};
use crate::engine::errors::BridgeError;
use crate::engine::types::{Datum, LogicalType};

/// Comparison a pushed-down predicate applies; codes are part of the wire format.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOp {
    Larger = 0,
    LargerOrEqual = 1,
    Less = 2,
    LessOrEqual = 3,
    In = 4,
    NotIn = 5,
    IsNull = 6,
}

impl FilterOp {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(FilterOp::Larger),
            1 => Some(FilterOp::LargerOrEqual),
            2 => Some(FilterOp::Less),
            3 => Some(FilterOp::LessOrEqual),
            4 => Some(FilterOp::In),
            5 => Some(FilterOp::NotIn),
            6 => Some(FilterOp::IsNull),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Larger => ">",
            FilterOp::LargerOrEqual => ">=",
            FilterOp::Less => "<",
            FilterOp::LessOrEqual => "<=",
            FilterOp::In => "IN",
            FilterOp::NotIn => "NOT IN",
            FilterOp::IsNull => "IS NULL",
        }
    }

    /// Evaluates `value OP operands`; a null value only satisfies `IS NULL`.
    pub fn evaluate(&self, value: Option<&Datum>, operands: &[Datum]) -> bool {
        let Some(value) = value else {
            return *self == FilterOp::IsNull;
        };
        let first = || operands.first().and_then(|o| value.partial_cmp(o));
        match self {
            FilterOp::Larger => first() == Some(Ordering::Greater),
            FilterOp::LargerOrEqual => {
                matches!(first(), Some(Ordering::Greater | Ordering::Equal))
            }
            FilterOp::Less => first() == Some(Ordering::Less),
            FilterOp::LessOrEqual => matches!(first(), Some(Ordering::Less | Ordering::Equal)),
            FilterOp::In => operands.iter().any(|o| o == value),
            FilterOp::NotIn => operands.iter().all(|o| o != value),
            FilterOp::IsNull => false,
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One serializable push-down predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPredicate {
    pub column: String,
    pub op: FilterOp,
    pub scale: u32,
    pub values: Vec<Datum>,
}

impl ScanPredicate {
    pub fn new(column: impl Into<String>, op: FilterOp, scale: u32, values: Vec<Datum>) -> Self {
        Self {
            column: column.into(),
            op,
            scale,
            values,
        }
    }

    /// Bytes `write_to` appends.
    pub fn encoded_len(&self) -> usize {
        SIZE_I32
            + self.column.len()
            + SIZE_I32 * 3
            + self
                .values
                .iter()
                .map(|v| SIZE_I32 + v.native_len())
                .sum::<usize>()
    }

    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<(), BridgeError> {
        let too_large = || {
            BridgeError::InvalidArgument(format!(
                "predicate on {} exceeds the encodable size",
                self.column
            ))
        };
        write_len(out, self.column.len()).ok_or_else(too_large)?;
        out.extend_from_slice(self.column.as_bytes());
        write_i32(out, self.op.code());
        write_len(out, self.scale as usize).ok_or_else(too_large)?;
        write_len(out, self.values.len()).ok_or_else(too_large)?;
        for value in &self.values {
            write_len(out, value.native_len()).ok_or_else(too_large)?;
            value.write_native(out);
        }
        Ok(())
    }
}

/// A predicate as read back by a producer, before its operands are typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawScanPredicate {
    pub column: String,
    pub op: FilterOp,
    pub scale: u32,
    pub values: Vec<Vec<u8>>,
}

impl RawScanPredicate {
    /// Types every operand as `logical`; `None` if any width disagrees.
    pub fn decode_values(&self, logical: LogicalType) -> Option<Vec<Datum>> {
        self.values
            .iter()
            .map(|raw| Datum::decode_native(logical, raw))
            .collect()
    }
}

/// Reads a buffer produced by `serialize_predicates`.
pub fn parse_scan_predicates(buf: &[u8]) -> Result<Vec<RawScanPredicate>, BridgeError> {
    let mut r = WireReader::new(buf);
    let corrupt = |what: &str, at: usize| {
        BridgeError::CorruptPredicate(format!("truncated or invalid {what} at byte {at}"))
    };

    let count = r
        .read_len()
        .ok_or_else(|| corrupt("predicate count", 0))?;
    let mut out = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        let name_len = r
            .read_len()
            .ok_or_else(|| corrupt("column name length", r.position()))?;
        let name = r
            .read_bytes(name_len)
            .ok_or_else(|| corrupt("column name", r.position()))?;
        let column = String::from_utf8(name.to_vec())
            .map_err(|_| corrupt("column name encoding", r.position()))?;
        let op = r
            .read_i32()
            .and_then(FilterOp::from_code)
            .ok_or_else(|| corrupt("filter op", r.position()))?;
        let scale = r
            .read_len()
            .ok_or_else(|| corrupt("scale", r.position()))? as u32;
        let value_count = r
            .read_len()
            .ok_or_else(|| corrupt("value count", r.position()))?;
        let mut values = Vec::with_capacity(value_count.min(1024));
        for _ in 0..value_count {
            let len = r
                .read_len()
                .ok_or_else(|| corrupt("value length", r.position()))?;
            let raw = r
                .read_bytes(len)
                .ok_or_else(|| corrupt("value", r.position()))?;
            values.push(raw.to_vec());
        }
        out.push(RawScanPredicate {
            column,
            op,
            scale,
            values,
        });
    }
    Ok(out)
}
