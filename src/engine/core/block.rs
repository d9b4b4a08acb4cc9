use std::fmt;

use crate::engine::core::column::Column;
use crate::engine::types::{DataType, TypeDescriptor};

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnWithTypeAndName {
    pub name: String,
    pub data_type: DataType,
    pub column: Column,
}

impl ColumnWithTypeAndName {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            column: Column::new(&data_type),
            data_type,
        }
    }
}

/// Destination of decoded batches: named columns in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    columns: Vec<ColumnWithTypeAndName>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_schema<S: AsRef<str>>(
        schema: &[(S, TypeDescriptor)],
    ) -> Result<Self, BlockError> {
        let mut block = Self::new();
        for (name, desc) in schema {
            block.insert(name.as_ref(), desc.to_data_type())?;
        }
        Ok(block)
    }

    pub fn insert(&mut self, name: &str, data_type: DataType) -> Result<(), BlockError> {
        if self.position(name).is_some() {
            return Err(BlockError::DuplicateColumn(name.to_string()));
        }
        if !self.columns.is_empty() && self.rows() != 0 {
            return Err(BlockError::NotEmpty(self.rows()));
        }
        self.columns.push(ColumnWithTypeAndName::new(name, data_type));
        Ok(())
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn get_by_name(&self, name: &str) -> Result<&ColumnWithTypeAndName, BlockError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| BlockError::ColumnNotFound(name.to_string()))
    }

    pub fn get_by_name_mut(
        &mut self,
        name: &str,
    ) -> Result<&mut ColumnWithTypeAndName, BlockError> {
        self.columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| BlockError::ColumnNotFound(name.to_string()))
    }

    pub fn column(&self, idx: usize) -> Result<&ColumnWithTypeAndName, BlockError> {
        self.columns
            .get(idx)
            .ok_or(BlockError::ColumnOutOfBounds(idx))
    }

    pub fn columns(&self) -> &[ColumnWithTypeAndName] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Row count of the first column; a block mid-fill may be ragged.
    pub fn rows(&self) -> usize {
        self.columns.first().map(|c| c.column.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows() == 0
    }

    /// True when every column holds the same number of rows.
    pub fn is_consistent(&self) -> bool {
        let rows = self.rows();
        self.columns.iter().all(|c| c.column.len() == rows)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum BlockError {
    DuplicateColumn(String),
    ColumnNotFound(String),
    ColumnOutOfBounds(usize),
    NotEmpty(usize),
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockError::DuplicateColumn(name) => write!(f, "duplicate column: {}", name),
            BlockError::ColumnNotFound(name) => write!(f, "column {} not found in block", name),
            BlockError::ColumnOutOfBounds(idx) => write!(f, "column index {} out of bounds", idx),
            BlockError::NotEmpty(rows) => {
                write!(f, "cannot add a column to a block holding {} rows", rows)
            }
        }
    }
}

impl std::error::Error for BlockError {}
