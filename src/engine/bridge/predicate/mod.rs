pub mod scan_predicate;
pub mod serializer;
pub mod value_range;
pub mod wire;

pub use scan_predicate::{FilterOp, RawScanPredicate, ScanPredicate, parse_scan_predicates};
pub use serializer::{PredicateBuffer, build_predicates, serialize_predicates};
pub use value_range::ColumnValueRange;
