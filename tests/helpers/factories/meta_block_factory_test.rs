use crate::engine::bridge::memory::{ForeignMemory, SharedArena};
use crate::engine::bridge::meta_cursor::MetaCursor;
use crate::test_helpers::factory::Factory;

#[test]
fn lays_out_count_then_column_slots() {
    let arena = SharedArena::new();
    let meta = Factory::meta_block(&arena)
        .with_rows(2)
        .with_fixed_column(None, &[7i32, 8])
        .with_unsupported_column()
        .build();

    let mut cursor = MetaCursor::new(&arena);
    cursor.set(meta);
    assert_eq!(cursor.next_as_count().unwrap(), 2);
    let nulls = cursor.next_as_pointer().unwrap();
    assert_eq!(&arena.read(nulls, 2).unwrap()[..], &[0, 0]);
    let data = cursor.next_as_pointer().unwrap();
    assert_eq!(arena.read(data, 8).unwrap().len(), 8);
    assert_eq!(cursor.next_as_pointer().unwrap(), 0);
}
