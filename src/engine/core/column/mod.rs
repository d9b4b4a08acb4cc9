pub mod column;
pub mod null_map;
pub mod string_column;

pub use column::{Column, ColumnValues};
pub use null_map::NullMap;
pub use string_column::StringColumn;
