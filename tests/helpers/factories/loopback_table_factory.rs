use crate::engine::bridge::loopback::{LoopbackTable, LoopbackTableBuilder};
use crate::engine::types::{Datum, PrimitiveType, TypeDescriptor};

/// Table with `id BIGINT NOT NULL`, `name VARCHAR(32)` (every fifth row null)
/// and `score DECIMAL(12,2)` (unscaled `id * 150`).
pub struct LoopbackTableFactory {
    rows: usize,
    extra: Vec<(String, TypeDescriptor, Vec<Option<Datum>>)>,
}

impl LoopbackTableFactory {
    pub fn new() -> Self {
        Self {
            rows: 10,
            extra: Vec::new(),
        }
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Appends a column after the default three; `values` must have `rows` entries.
    pub fn with_column(
        mut self,
        name: &str,
        desc: TypeDescriptor,
        values: Vec<Option<Datum>>,
    ) -> Self {
        self.extra.push((name.to_string(), desc, values));
        self
    }

    pub fn schema() -> Vec<(&'static str, TypeDescriptor)> {
        vec![
            ("id", TypeDescriptor::new(PrimitiveType::BigInt).not_null()),
            ("name", TypeDescriptor::varchar(32)),
            ("score", TypeDescriptor::decimal(12, 2)),
        ]
    }

    pub fn create(self) -> LoopbackTable {
        let ids: Vec<Option<Datum>> = (0..self.rows).map(|i| Some(Datum::Int64(i as i64))).collect();
        let names: Vec<Option<Datum>> = (0..self.rows)
            .map(|i| (i % 5 != 4).then(|| Datum::utf8(&format!("user_{i}"))))
            .collect();
        let scores: Vec<Option<Datum>> = (0..self.rows)
            .map(|i| Some(Datum::Decimal64(i as i64 * 150)))
            .collect();

        let mut builder: LoopbackTableBuilder = LoopbackTable::builder();
        for ((name, desc), values) in Self::schema().into_iter().zip([ids, names, scores]) {
            builder = builder.column(name, desc, values);
        }
        for (name, desc, values) in self.extra {
            builder = builder.column(name, desc, values);
        }
        builder.build().expect("loopback table factory produced an invalid table")
    }
}
