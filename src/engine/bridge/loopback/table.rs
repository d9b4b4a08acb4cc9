use crate::engine::errors::BridgeError;
use crate::engine::types::{Datum, TypeDescriptor};

#[derive(Debug, Clone, PartialEq)]
pub struct LoopbackColumn {
    pub name: String,
    pub desc: TypeDescriptor,
    /// One entry per row, `None` for null.
    pub values: Vec<Option<Datum>>,
}

/// Row source behind a loopback scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopbackTable {
    columns: Vec<LoopbackColumn>,
    rows: usize,
}

impl LoopbackTable {
    pub fn builder() -> LoopbackTableBuilder {
        LoopbackTableBuilder::default()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> &[LoopbackColumn] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

#[derive(Debug, Default)]
pub struct LoopbackTableBuilder {
    columns: Vec<LoopbackColumn>,
}

impl LoopbackTableBuilder {
    pub fn column(
        mut self,
        name: impl Into<String>,
        desc: TypeDescriptor,
        values: Vec<Option<Datum>>,
    ) -> Self {
        self.columns.push(LoopbackColumn {
            name: name.into(),
            desc,
            values,
        });
        self
    }

    pub fn build(self) -> Result<LoopbackTable, BridgeError> {
        let rows = self.columns.first().map(|c| c.values.len()).unwrap_or(0);
        for (idx, column) in self.columns.iter().enumerate() {
            if self.columns[..idx].iter().any(|c| c.name == column.name) {
                return Err(BridgeError::InvalidArgument(format!(
                    "duplicate loopback column {}",
                    column.name
                )));
            }
            if column.values.len() != rows {
                return Err(BridgeError::InvalidArgument(format!(
                    "column {} has {} rows, expected {}",
                    column.name,
                    column.values.len(),
                    rows
                )));
            }
            let logical = column.desc.logical_type();
            if !logical.is_transferable() {
                continue;
            }
            for (row, value) in column.values.iter().enumerate() {
                match value {
                    None if !column.desc.nullable => {
                        return Err(BridgeError::InvalidArgument(format!(
                            "null in non-nullable column {} at row {}",
                            column.name, row
                        )));
                    }
                    Some(v) if !v.fits(logical) => {
                        return Err(BridgeError::InvalidArgument(format!(
                            "value {} at row {} does not fit {} column {}",
                            v, row, logical, column.name
                        )));
                    }
                    _ => {}
                }
            }
        }
        Ok(LoopbackTable {
            columns: self.columns,
            rows,
        })
    }
}
