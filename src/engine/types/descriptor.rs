use super::{DataType, LogicalType};

/// Precision/scale every `decimalv2` column is presented with.
pub const DECIMALV2_PRECISION: u32 = 27;
pub const DECIMALV2_SCALE: u32 = 9;

pub const MAX_DECIMAL32_PRECISION: u32 = 9;
pub const MAX_DECIMAL64_PRECISION: u32 = 18;

/// Type family of a column as declared by the local planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    LargeInt,
    Float,
    Double,
    Varchar,
    Char,
    String,
    Binary,
    Date,
    DateTime,
    DateV2,
    DateTimeV2,
    Time,
    TimeV2,
    DecimalV2,
    Decimal32,
    Decimal64,
    Decimal128I,
    Struct,
    Array,
    Map,
    Hll,
    Bitmap,
}

/// Local, possibly nested, type descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub ty: PrimitiveType,
    /// Declared length for `char`/`varchar`.
    pub len: i32,
    pub precision: u32,
    pub scale: u32,
    pub children: Vec<TypeDescriptor>,
    /// Field names for `struct`, parallel to `children`.
    pub field_names: Vec<String>,
    pub nullable: bool,
}

impl TypeDescriptor {
    pub fn new(ty: PrimitiveType) -> Self {
        Self {
            ty,
            len: -1,
            precision: 0,
            scale: 0,
            children: Vec::new(),
            field_names: Vec::new(),
            nullable: true,
        }
    }

    pub fn varchar(len: i32) -> Self {
        Self {
            len,
            ..Self::new(PrimitiveType::Varchar)
        }
    }

    pub fn char(len: i32) -> Self {
        Self {
            len,
            ..Self::new(PrimitiveType::Char)
        }
    }

    /// Decimal whose storage width follows from `precision`.
    pub fn decimal(precision: u32, scale: u32) -> Self {
        let ty = if precision <= MAX_DECIMAL32_PRECISION {
            PrimitiveType::Decimal32
        } else if precision <= MAX_DECIMAL64_PRECISION {
            PrimitiveType::Decimal64
        } else {
            PrimitiveType::Decimal128I
        };
        Self::decimal_of(ty, precision, scale)
    }

    pub fn decimal_of(ty: PrimitiveType, precision: u32, scale: u32) -> Self {
        Self {
            precision,
            scale,
            ..Self::new(ty)
        }
    }

    pub fn decimalv2() -> Self {
        Self::decimal_of(PrimitiveType::DecimalV2, DECIMALV2_PRECISION, DECIMALV2_SCALE)
    }

    pub fn array(element: TypeDescriptor) -> Self {
        Self {
            children: vec![element],
            ..Self::new(PrimitiveType::Array)
        }
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self {
            children: vec![key, value],
            ..Self::new(PrimitiveType::Map)
        }
    }

    pub fn struct_of<S: Into<String>>(fields: Vec<(S, TypeDescriptor)>) -> Self {
        let mut desc = Self::new(PrimitiveType::Struct);
        for (name, child) in fields {
            desc.field_names.push(name.into());
            desc.children.push(child);
        }
        desc
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn logical_type(&self) -> LogicalType {
        match self.ty {
            PrimitiveType::Boolean => LogicalType::UInt8,
            PrimitiveType::TinyInt => LogicalType::Int8,
            PrimitiveType::SmallInt => LogicalType::Int16,
            PrimitiveType::Int => LogicalType::Int32,
            PrimitiveType::BigInt => LogicalType::Int64,
            PrimitiveType::LargeInt => LogicalType::Int128,
            PrimitiveType::Float => LogicalType::Float32,
            PrimitiveType::Double | PrimitiveType::Time | PrimitiveType::TimeV2 => {
                LogicalType::Float64
            }
            PrimitiveType::Varchar | PrimitiveType::String | PrimitiveType::Binary => {
                LogicalType::String
            }
            PrimitiveType::Char => LogicalType::FixedString,
            PrimitiveType::Date => LogicalType::Date,
            PrimitiveType::DateTime => LogicalType::DateTime,
            PrimitiveType::DateV2 => LogicalType::DateV2,
            PrimitiveType::DateTimeV2 => LogicalType::DateTimeV2,
            PrimitiveType::DecimalV2 => LogicalType::Decimal128,
            PrimitiveType::Decimal32 => LogicalType::Decimal32,
            PrimitiveType::Decimal64 => LogicalType::Decimal64,
            PrimitiveType::Decimal128I => LogicalType::Decimal128I,
            PrimitiveType::Array => LogicalType::Array,
            PrimitiveType::Map => LogicalType::Map,
            PrimitiveType::Struct => LogicalType::Struct,
            PrimitiveType::Hll | PrimitiveType::Bitmap => LogicalType::Nothing,
        }
    }

    pub fn to_data_type(&self) -> DataType {
        DataType::new(self.logical_type(), self.nullable).with_decimal(self.precision, self.scale)
    }
}
