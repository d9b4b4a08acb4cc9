use crate::engine::types::{LogicalType, PrimitiveType, TypeDescriptor};

#[test]
fn decimal_width_follows_declared_precision() {
    assert_eq!(TypeDescriptor::decimal(5, 2).ty, PrimitiveType::Decimal32);
    assert_eq!(TypeDescriptor::decimal(9, 0).ty, PrimitiveType::Decimal32);
    assert_eq!(TypeDescriptor::decimal(12, 4).ty, PrimitiveType::Decimal64);
    assert_eq!(TypeDescriptor::decimal(18, 4).ty, PrimitiveType::Decimal64);
    assert_eq!(TypeDescriptor::decimal(38, 10).ty, PrimitiveType::Decimal128I);
}

#[test]
fn data_type_carries_nullability_and_scale() {
    let dt = TypeDescriptor::decimal(12, 3).not_null().to_data_type();
    assert_eq!(dt.logical, LogicalType::Decimal64);
    assert!(!dt.nullable);
    assert_eq!((dt.precision, dt.scale), (12, 3));
    assert_eq!(dt.to_string(), "Decimal64");

    let nullable = TypeDescriptor::new(PrimitiveType::Int).to_data_type();
    assert_eq!(nullable.to_string(), "Nullable(Int32)");
}

#[test]
fn legacy_and_nested_types_are_not_transferable() {
    for ty in [
        PrimitiveType::Date,
        PrimitiveType::DateTime,
        PrimitiveType::LargeInt,
        PrimitiveType::Hll,
    ] {
        assert!(!TypeDescriptor::new(ty).logical_type().is_transferable());
    }
    let nested = TypeDescriptor::array(TypeDescriptor::new(PrimitiveType::Int));
    assert!(!nested.logical_type().is_transferable());
    assert!(TypeDescriptor::new(PrimitiveType::DateV2).logical_type().is_transferable());
    assert_eq!(TypeDescriptor::char(4).logical_type(), LogicalType::FixedString);
}
