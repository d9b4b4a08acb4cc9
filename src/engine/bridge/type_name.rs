use crate::engine::types::descriptor::{DECIMALV2_PRECISION, DECIMALV2_SCALE};
use crate::engine::types::{PrimitiveType, TypeDescriptor};

/// Name of `desc` in the scanner's schema dialect.
///
/// Never fails: anything without a counterpart maps to `unsupported` and the
/// scanner decides how to react.
pub fn hive_type_name(desc: &TypeDescriptor) -> String {
    match desc.ty {
        PrimitiveType::Boolean => "boolean".into(),
        PrimitiveType::TinyInt => "tinyint".into(),
        PrimitiveType::SmallInt => "smallint".into(),
        PrimitiveType::Int => "int".into(),
        PrimitiveType::BigInt => "bigint".into(),
        PrimitiveType::Float => "float".into(),
        PrimitiveType::Double => "double".into(),
        PrimitiveType::Varchar => format!("varchar({})", desc.len),
        PrimitiveType::Char => format!("char({})", desc.len),
        PrimitiveType::Date | PrimitiveType::DateV2 => "date".into(),
        PrimitiveType::DateTime
        | PrimitiveType::DateTimeV2
        | PrimitiveType::Time
        | PrimitiveType::TimeV2 => "timestamp".into(),
        PrimitiveType::Binary => "binary".into(),
        PrimitiveType::String => "string".into(),
        PrimitiveType::DecimalV2 => {
            format!("decimalv2({},{})", DECIMALV2_PRECISION, DECIMALV2_SCALE)
        }
        PrimitiveType::Decimal32 => format!("decimal32({},{})", desc.precision, desc.scale),
        PrimitiveType::Decimal64 => format!("decimal64({},{})", desc.precision, desc.scale),
        PrimitiveType::Decimal128I => format!("decimal128({},{})", desc.precision, desc.scale),
        PrimitiveType::Struct => {
            let fields = desc
                .field_names
                .iter()
                .zip(&desc.children)
                .map(|(name, child)| format!("{}:{}", name, hive_type_name(child)))
                .collect::<Vec<_>>();
            format!("struct<{}>", fields.join(","))
        }
        PrimitiveType::Array => match desc.children.first() {
            Some(element) => format!("array<{}>", hive_type_name(element)),
            None => UNSUPPORTED.into(),
        },
        PrimitiveType::Map => match (desc.children.first(), desc.children.get(1)) {
            (Some(key), Some(value)) => {
                format!("map<{},{}>", hive_type_name(key), hive_type_name(value))
            }
            _ => UNSUPPORTED.into(),
        },
        PrimitiveType::LargeInt | PrimitiveType::Hll | PrimitiveType::Bitmap => {
            UNSUPPORTED.into()
        }
    }
}

pub const UNSUPPORTED: &str = "unsupported";

/// `#`-joined type names in column order, as passed in `columns_types`.
pub fn columns_types_param<'a, I>(descs: I) -> String
where
    I: IntoIterator<Item = &'a TypeDescriptor>,
{
    descs
        .into_iter()
        .map(hive_type_name)
        .collect::<Vec<_>>()
        .join("#")
}
