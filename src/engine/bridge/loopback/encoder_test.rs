use crate::engine::bridge::loopback::encoder::{EncodedColumn, encode_column, encode_meta};
use crate::engine::bridge::loopback::LoopbackColumn;
use crate::engine::bridge::memory::{ForeignMemory, SharedArena};
use crate::engine::bridge::meta_cursor::MetaCursor;
use crate::engine::types::{Datum, PrimitiveType, TypeDescriptor};

fn column(desc: TypeDescriptor, values: Vec<Option<Datum>>) -> LoopbackColumn {
    LoopbackColumn {
        name: "c".into(),
        desc,
        values,
    }
}

#[test]
fn fixed_width_nulls_are_zero_filled() {
    let arena = SharedArena::new();
    let col = column(
        TypeDescriptor::new(PrimitiveType::Int),
        vec![Some(Datum::Int32(10)), None, Some(Datum::Int32(30))],
    );

    let encoded = encode_column(&arena, &col, &[0, 1, 2]).unwrap();

    assert_eq!(encoded.slots.len(), 2);
    assert_eq!(encoded.regions, encoded.slots);
    assert_eq!(&arena.read(encoded.slots[0], 3).unwrap()[..], &[0, 1, 0]);
    let data = arena.read(encoded.slots[1], 12).unwrap();
    let mut expected = Vec::new();
    for v in [10i32, 0, 30] {
        expected.extend_from_slice(&v.to_ne_bytes());
    }
    assert_eq!(&data[..], &expected[..]);
}

#[test]
fn strings_get_cumulative_end_offsets() {
    let arena = SharedArena::new();
    let col = column(
        TypeDescriptor::varchar(16),
        vec![
            Some(Datum::utf8("abc")),
            None,
            Some(Datum::utf8("xyz1")),
        ],
    );

    let encoded = encode_column(&arena, &col, &[0, 1, 2]).unwrap();

    assert_eq!(encoded.slots.len(), 3);
    let offsets = arena.read(encoded.slots[1], 12).unwrap();
    let ends: Vec<i32> = offsets
        .chunks_exact(4)
        .map(|c| i32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    assert_eq!(ends, vec![3, 3, 7]);
    assert_eq!(&arena.read_to_end(encoded.slots[2]).unwrap()[..], b"abcxyz1");
}

#[test]
fn encodes_only_the_selected_rows() {
    let arena = SharedArena::new();
    let col = column(
        TypeDescriptor::new(PrimitiveType::BigInt),
        (0..5).map(|i| Some(Datum::Int64(i))).collect(),
    );

    let encoded = encode_column(&arena, &col, &[1, 3]).unwrap();

    let data = arena.read_to_end(encoded.slots[1]).unwrap();
    assert_eq!(data.len(), 16);
    assert_eq!(i64::from_ne_bytes(data[8..16].try_into().unwrap()), 3);
}

#[test]
fn nested_columns_cannot_be_encoded() {
    let arena = SharedArena::new();
    let col = column(
        TypeDescriptor::map(
            TypeDescriptor::new(PrimitiveType::String),
            TypeDescriptor::new(PrimitiveType::Int),
        ),
        vec![None],
    );
    assert!(encode_column(&arena, &col, &[0]).is_err());
}

#[test]
fn meta_block_lists_row_count_then_slots() {
    let arena = SharedArena::new();
    let columns = vec![
        EncodedColumn {
            slots: vec![0x10, 0x20],
            regions: Vec::new(),
        },
        EncodedColumn::unsupported(),
    ];

    let meta = encode_meta(&arena, 7, &columns);

    let mut cursor = MetaCursor::new(&arena);
    cursor.set(meta);
    assert_eq!(cursor.next_as_count().unwrap(), 7);
    assert_eq!(cursor.next_as_pointer().unwrap(), 0x10);
    assert_eq!(cursor.next_as_pointer().unwrap(), 0x20);
    assert_eq!(cursor.next_as_pointer().unwrap(), 0);
    assert!(cursor.next_as_pointer().is_err());
}

#[test]
fn failed_encode_publishes_nothing() {
    let arena = SharedArena::new();
    let col = column(
        TypeDescriptor::new(PrimitiveType::LargeInt),
        vec![None, None],
    );

    let err = encode_column(&arena, &col, &[0, 1]).unwrap_err();

    assert!(err.to_string().contains("Int128"));
    assert_eq!(arena.live_regions(), 0);
}
