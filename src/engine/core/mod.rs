pub mod block;
pub mod column;

pub use block::{Block, BlockError, ColumnWithTypeAndName};
