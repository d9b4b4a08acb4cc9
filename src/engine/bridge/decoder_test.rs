use crate::engine::bridge::decoder::fill_column;
use crate::engine::bridge::memory::SharedArena;
use crate::engine::bridge::meta_cursor::MetaCursor;
use crate::engine::core::column::{Column, ColumnValues};
use crate::engine::errors::BridgeError;
use crate::engine::types::{DataType, Datum, LogicalType, TypeDescriptor};
use crate::shared::datetime::packed::DateV2Value;
use crate::test_helpers::factory::Factory;

fn cursor_after_count(arena: &SharedArena, meta: u64) -> MetaCursor<'_, SharedArena> {
    let mut cursor = MetaCursor::new(arena);
    cursor.set(meta);
    cursor.next_as_count().unwrap();
    cursor
}

#[test]
fn decodes_nullable_numeric_column() {
    let arena = SharedArena::new();
    let meta = Factory::meta_block(&arena)
        .with_rows(3)
        .with_fixed_column(Some(vec![0, 1, 0]), &[10i32, 0, 30])
        .build();
    let mut column = Column::new(&DataType::nullable(LogicalType::Int32));
    let mut cursor = cursor_after_count(&arena, meta);

    fill_column(&mut column, LogicalType::Int32, 3, &mut cursor).unwrap();

    assert_eq!(column.len(), 3);
    assert_eq!(column.datum_at(0), Some(Datum::Int32(10)));
    assert_eq!(column.datum_at(1), None);
    assert_eq!(column.datum_at(2), Some(Datum::Int32(30)));
    assert_eq!(cursor.slots_read(), 3);
}

#[test]
fn decodes_strings_with_empty_row() {
    let arena = SharedArena::new();
    let meta = Factory::meta_block(&arena)
        .with_rows(3)
        .with_string_column(None, &[3, 3, 7], b"abcxyz1")
        .build();
    let mut column = Column::new(&DataType::nullable(LogicalType::String));
    let mut cursor = cursor_after_count(&arena, meta);

    fill_column(&mut column, LogicalType::String, 3, &mut cursor).unwrap();

    let ColumnValues::String(strings) = column.values() else {
        panic!("expected a string column");
    };
    assert_eq!(strings.get_str(0), Some("abc"));
    assert_eq!(strings.get_str(1), Some(""));
    assert_eq!(strings.get_str(2), Some("xyz1"));
    assert_eq!(cursor.slots_read(), 4);
}

#[test]
fn decimal_width_follows_declared_precision() {
    let arena = SharedArena::new();
    let meta = Factory::meta_block(&arena)
        .with_rows(2)
        .with_fixed_column(None, &[12345i64, -5])
        .build();
    let data_type = TypeDescriptor::decimal(12, 2).to_data_type();
    assert_eq!(data_type.logical, LogicalType::Decimal64);
    let mut column = Column::new(&data_type);
    let mut cursor = cursor_after_count(&arena, meta);

    fill_column(&mut column, data_type.logical, 2, &mut cursor).unwrap();

    assert_eq!(
        column.values(),
        &ColumnValues::Decimal64(vec![12345, -5])
    );
}

#[test]
fn zero_null_map_pointer_is_the_scanner_sentinel() {
    let arena = SharedArena::new();
    let meta = Factory::meta_block(&arena)
        .with_rows(1)
        .with_unsupported_column()
        .build();
    let mut column = Column::new(&DataType::nullable(LogicalType::Int64));
    let mut cursor = cursor_after_count(&arena, meta);

    let err = fill_column(&mut column, LogicalType::Int64, 1, &mut cursor).unwrap_err();

    assert!(matches!(err, BridgeError::UnsupportedByScanner(ref t) if t == "Int64"));
    assert_eq!(cursor.slots_read(), 2);
    assert!(column.is_empty());
}

#[test]
fn nested_types_are_rejected_explicitly() {
    let arena = SharedArena::new();
    let meta = Factory::meta_block(&arena)
        .with_rows(1)
        .with_fixed_column(None, &[0u8])
        .build();
    let mut column = Column::new(&DataType::nullable(LogicalType::Array));
    let mut cursor = cursor_after_count(&arena, meta);

    let err = fill_column(&mut column, LogicalType::Array, 1, &mut cursor).unwrap_err();

    assert!(matches!(err, BridgeError::UnsupportedType(ref t) if t == "Array"));
}

#[test]
fn appends_to_existing_rows() {
    let arena = SharedArena::new();
    let first = Factory::meta_block(&arena)
        .with_rows(2)
        .with_fixed_column(None, &[1i16, 2])
        .build();
    let second = Factory::meta_block(&arena)
        .with_rows(1)
        .with_fixed_column(Some(vec![1]), &[0i16])
        .build();
    let mut column = Column::new(&DataType::nullable(LogicalType::Int16));

    let mut cursor = cursor_after_count(&arena, first);
    fill_column(&mut column, LogicalType::Int16, 2, &mut cursor).unwrap();
    let mut cursor = cursor_after_count(&arena, second);
    fill_column(&mut column, LogicalType::Int16, 1, &mut cursor).unwrap();

    assert_eq!(column.len(), 3);
    assert_eq!(column.null_map().unwrap().len(), 3);
    assert_eq!(column.datum_at(1), Some(Datum::Int16(2)));
    assert!(column.is_null_at(2));
}

#[test]
fn non_nullable_column_still_consumes_null_map_slot() {
    let arena = SharedArena::new();
    let meta = Factory::meta_block(&arena)
        .with_rows(2)
        .with_fixed_column(None, &[1.5f64, 2.5])
        .with_fixed_column(None, &[9u8, 8])
        .build();
    let mut doubles = Column::new(&DataType::not_null(LogicalType::Float64));
    let mut flags = Column::new(&DataType::not_null(LogicalType::UInt8));
    let mut cursor = cursor_after_count(&arena, meta);

    fill_column(&mut doubles, LogicalType::Float64, 2, &mut cursor).unwrap();
    fill_column(&mut flags, LogicalType::UInt8, 2, &mut cursor).unwrap();

    assert!(doubles.null_map().is_none());
    assert_eq!(doubles.values(), &ColumnValues::Float64(vec![1.5, 2.5]));
    assert_eq!(flags.values(), &ColumnValues::UInt8(vec![9, 8]));
    assert_eq!(cursor.slots_read(), 5);
}

#[test]
fn decreasing_string_offsets_are_corrupt() {
    let arena = SharedArena::new();
    let meta = Factory::meta_block(&arena)
        .with_rows(2)
        .with_string_column(None, &[4, 2], b"abcd")
        .build();
    let mut column = Column::new(&DataType::nullable(LogicalType::String));
    let mut cursor = cursor_after_count(&arena, meta);

    let err = fill_column(&mut column, LogicalType::String, 2, &mut cursor).unwrap_err();

    assert!(matches!(err, BridgeError::CorruptMeta(_)));
}

#[test]
fn string_data_shorter_than_last_offset_is_a_memory_error() {
    let arena = SharedArena::new();
    let meta = Factory::meta_block(&arena)
        .with_rows(1)
        .with_string_column(None, &[10], b"short")
        .build();
    let mut column = Column::new(&DataType::nullable(LogicalType::String));
    let mut cursor = cursor_after_count(&arena, meta);

    let err = fill_column(&mut column, LogicalType::String, 1, &mut cursor).unwrap_err();

    assert!(matches!(err, BridgeError::Memory(_)));
}

#[test]
fn declared_type_must_match_destination_buffer() {
    let arena = SharedArena::new();
    let meta = Factory::meta_block(&arena)
        .with_rows(1)
        .with_fixed_column(None, &[1i32])
        .build();
    let mut column = Column::new(&DataType::nullable(LogicalType::Int64));
    let mut cursor = cursor_after_count(&arena, meta);

    let err = fill_column(&mut column, LogicalType::Int32, 1, &mut cursor)
        .unwrap_err()
        .with_column("amount");

    match err {
        BridgeError::ColumnTypeMismatch {
            column,
            declared,
            actual,
        } => {
            assert_eq!(column, "amount");
            assert_eq!(declared, "Int32");
            assert_eq!(actual, "Int64");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn packed_dates_are_copied_verbatim() {
    let arena = SharedArena::new();
    let date = DateV2Value::from_ymd(2024, 2, 29);
    let meta = Factory::meta_block(&arena)
        .with_rows(1)
        .with_fixed_column(None, &[date])
        .build();
    let mut column = Column::new(&DataType::nullable(LogicalType::DateV2));
    let mut cursor = cursor_after_count(&arena, meta);

    fill_column(&mut column, LogicalType::DateV2, 1, &mut cursor).unwrap();

    assert_eq!(column.datum_at(0), Some(Datum::DateV2(date)));
    assert_eq!(column.datum_at(0).unwrap().to_string(), "2024-02-29");
}
