use std::fmt;

pub mod datum;
pub mod descriptor;
pub mod native;

pub use datum::Datum;
pub use descriptor::{PrimitiveType, TypeDescriptor};
pub use native::NativeValue;

#[cfg(test)]
mod descriptor_test;

/// Physical layout family of a destination column, independent of nullability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Nothing,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    Float32,
    Float64,
    Decimal32,
    Decimal64,
    Decimal128,
    Decimal128I,
    Date,
    DateTime,
    DateV2,
    DateTimeV2,
    String,
    FixedString,
    Array,
    Map,
    Struct,
}

impl LogicalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalType::Nothing => "Nothing",
            LogicalType::UInt8 => "UInt8",
            LogicalType::UInt16 => "UInt16",
            LogicalType::UInt32 => "UInt32",
            LogicalType::UInt64 => "UInt64",
            LogicalType::Int8 => "Int8",
            LogicalType::Int16 => "Int16",
            LogicalType::Int32 => "Int32",
            LogicalType::Int64 => "Int64",
            LogicalType::Int128 => "Int128",
            LogicalType::Float32 => "Float32",
            LogicalType::Float64 => "Float64",
            LogicalType::Decimal32 => "Decimal32",
            LogicalType::Decimal64 => "Decimal64",
            LogicalType::Decimal128 => "Decimal128",
            LogicalType::Decimal128I => "Decimal128I",
            LogicalType::Date => "Date",
            LogicalType::DateTime => "DateTime",
            LogicalType::DateV2 => "DateV2",
            LogicalType::DateTimeV2 => "DateTimeV2",
            LogicalType::String => "String",
            LogicalType::FixedString => "FixedString",
            LogicalType::Array => "Array",
            LogicalType::Map => "Map",
            LogicalType::Struct => "Struct",
        }
    }

    /// Types the batch protocol knows how to move across the boundary.
    ///
    /// Legacy `Date`/`DateTime`, 128-bit integers and nested types are declared
    /// by the local type system but never emitted by the producer.
    pub fn is_transferable(&self) -> bool {
        !matches!(
            self,
            LogicalType::Nothing
                | LogicalType::Int128
                | LogicalType::Date
                | LogicalType::DateTime
                | LogicalType::Array
                | LogicalType::Map
                | LogicalType::Struct
        )
    }

    /// Width in bytes of one value in a fixed-width batch buffer, `None` for
    /// variable-width and non-transferable types.
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            LogicalType::UInt8 | LogicalType::Int8 => Some(1),
            LogicalType::UInt16 | LogicalType::Int16 => Some(2),
            LogicalType::UInt32
            | LogicalType::Int32
            | LogicalType::Float32
            | LogicalType::Decimal32
            | LogicalType::DateV2 => Some(4),
            LogicalType::UInt64
            | LogicalType::Int64
            | LogicalType::Float64
            | LogicalType::Decimal64
            | LogicalType::DateTimeV2 => Some(8),
            LogicalType::Decimal128 | LogicalType::Decimal128I => Some(16),
            _ => None,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, LogicalType::String | LogicalType::FixedString)
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of one destination column.
///
/// Precision and scale travel with the type, never with the raw values, so the
/// decimal width is fixed by `logical` before any byte is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataType {
    pub logical: LogicalType,
    pub nullable: bool,
    pub precision: u32,
    pub scale: u32,
}

impl DataType {
    pub fn new(logical: LogicalType, nullable: bool) -> Self {
        Self {
            logical,
            nullable,
            precision: 0,
            scale: 0,
        }
    }

    pub fn nullable(logical: LogicalType) -> Self {
        Self::new(logical, true)
    }

    pub fn not_null(logical: LogicalType) -> Self {
        Self::new(logical, false)
    }

    pub fn with_decimal(mut self, precision: u32, scale: u32) -> Self {
        self.precision = precision;
        self.scale = scale;
        self
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "Nullable({})", self.logical)
        } else {
            write!(f, "{}", self.logical)
        }
    }
}
