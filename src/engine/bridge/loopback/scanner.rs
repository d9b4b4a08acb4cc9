use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::engine::bridge::boundary::{BoundaryException, BoundaryResult, ScannerHandle};
use crate::engine::bridge::connector::{COLUMNS_TYPES, PUSH_DOWN_PREDICATES, REQUIRED_FIELDS};
use crate::engine::bridge::loopback::encoder::{EncodedColumn, encode_column, encode_meta};
use crate::engine::bridge::loopback::table::LoopbackTable;
use crate::engine::bridge::loopback::{CallJournal, ScannerCall};
use crate::engine::bridge::memory::SharedArena;
use crate::engine::bridge::predicate::{FilterOp, parse_scan_predicates};
use crate::engine::bridge::type_name::{UNSUPPORTED, hive_type_name};
use crate::engine::types::Datum;

const SCANNER_CLASS: &str = "LoopbackScanner";

fn exception(message: impl Into<String>) -> BoundaryException {
    BoundaryException::new(SCANNER_CLASS, message)
}

/// Regions backing the batch currently handed out.
#[derive(Debug, Default)]
struct OutstandingBatch {
    meta: Option<u64>,
    columns: Vec<Option<EncodedColumn>>,
}

struct PushedFilter {
    column: usize,
    op: FilterOp,
    operands: Vec<Datum>,
}

/// In-process producer: negotiates the schema, applies pushed-down
/// predicates and emits batches in the metadata layout over a `SharedArena`.
pub struct LoopbackScanner {
    arena: SharedArena,
    table: Arc<LoopbackTable>,
    batch_size: usize,
    /// Table column per requested field, in request order.
    projection: Vec<usize>,
    /// Whether each requested field can be emitted under the negotiated type.
    emittable: Vec<bool>,
    predicates_addr: Option<u64>,
    filters: Vec<PushedFilter>,
    selected: Vec<usize>,
    position: usize,
    outstanding: OutstandingBatch,
    journal: CallJournal,
    opened: bool,
    closed: bool,
}

impl LoopbackScanner {
    pub fn new(
        arena: SharedArena,
        table: Arc<LoopbackTable>,
        batch_size: usize,
        params: &HashMap<String, String>,
        journal: CallJournal,
    ) -> BoundaryResult<Self> {
        if batch_size == 0 {
            return Err(exception("batch size must be positive"));
        }

        let projection = match params.get(REQUIRED_FIELDS) {
            Some(fields) if !fields.is_empty() => fields
                .split(',')
                .map(|f| {
                    table
                        .column_index(f)
                        .ok_or_else(|| exception(format!("unknown field {f}")))
                })
                .collect::<BoundaryResult<Vec<_>>>()?,
            _ => (0..table.columns().len()).collect(),
        };

        let emittable = match params.get(COLUMNS_TYPES) {
            Some(types) => {
                let requested: Vec<&str> = types.split('#').collect();
                if requested.len() != projection.len() {
                    return Err(exception(format!(
                        "{} column types for {} fields",
                        requested.len(),
                        projection.len()
                    )));
                }
                projection
                    .iter()
                    .zip(requested)
                    .map(|(idx, name)| {
                        let column = &table.columns()[*idx];
                        name != UNSUPPORTED
                            && name == hive_type_name(&column.desc)
                            && column.desc.logical_type().is_transferable()
                    })
                    .collect()
            }
            None => projection
                .iter()
                .map(|idx| table.columns()[*idx].desc.logical_type().is_transferable())
                .collect(),
        };

        let predicates_addr = params
            .get(PUSH_DOWN_PREDICATES)
            .map(|raw| {
                raw.parse::<u64>()
                    .map_err(|_| exception(format!("invalid predicate address {raw}")))
            })
            .transpose()?;

        Ok(Self {
            arena,
            table,
            batch_size,
            projection,
            emittable,
            predicates_addr,
            filters: Vec::new(),
            selected: Vec::new(),
            position: 0,
            outstanding: OutstandingBatch::default(),
            journal,
            opened: false,
            closed: false,
        })
    }

    /// Rows surviving the pushed-down predicates, known after `open`.
    pub fn selected_rows(&self) -> usize {
        self.selected.len()
    }

    pub fn pushed_filter_count(&self) -> usize {
        self.filters.len()
    }

    fn load_filters(&mut self) -> BoundaryResult<()> {
        let Some(addr) = self.predicates_addr else {
            return Ok(());
        };
        let buf = self
            .arena
            .read_to_end(addr)
            .map_err(|e| exception(format!("predicate buffer unreadable: {e}")))?;
        let raw = parse_scan_predicates(&buf).map_err(|e| exception(e.to_string()))?;
        for predicate in raw {
            let Some(column) = self.table.column_index(&predicate.column) else {
                warn!(column = %predicate.column, "ignoring predicate on unknown column");
                continue;
            };
            let logical = self.table.columns()[column].desc.logical_type();
            let Some(operands) = predicate.decode_values(logical) else {
                warn!(column = %predicate.column, "ignoring predicate with undecodable operands");
                continue;
            };
            self.filters.push(PushedFilter {
                column,
                op: predicate.op,
                operands,
            });
        }
        Ok(())
    }

    fn row_matches(&self, row: usize) -> bool {
        self.filters.iter().all(|f| {
            let value = self.table.columns()[f.column].values[row].as_ref();
            f.op.evaluate(value, &f.operands)
        })
    }

    fn release_column_regions(&mut self, idx: usize) {
        if let Some(Some(column)) = self.outstanding.columns.get_mut(idx).map(Option::take) {
            for addr in column.regions {
                self.arena.release(addr);
            }
        }
    }

    fn release_outstanding(&mut self) {
        for idx in 0..self.outstanding.columns.len() {
            self.release_column_regions(idx);
        }
        self.outstanding.columns.clear();
        if let Some(meta) = self.outstanding.meta.take() {
            self.arena.release(meta);
        }
    }
}

impl ScannerHandle for LoopbackScanner {
    fn open(&mut self) -> BoundaryResult<()> {
        self.journal.record(ScannerCall::Open);
        if self.closed {
            return Err(exception("scanner already closed"));
        }
        self.load_filters()?;
        self.selected = (0..self.table.rows())
            .filter(|row| self.row_matches(*row))
            .collect();
        self.position = 0;
        self.opened = true;
        debug!(
            rows = self.table.rows(),
            selected = self.selected.len(),
            filters = self.filters.len(),
            "loopback scanner opened"
        );
        Ok(())
    }

    fn get_next_batch_meta(&mut self) -> BoundaryResult<u64> {
        self.journal.record(ScannerCall::GetNextBatchMeta);
        if !self.opened || self.closed {
            return Err(exception("scanner is not open"));
        }
        self.release_outstanding();
        if self.position >= self.selected.len() {
            return Ok(0);
        }

        let end = (self.position + self.batch_size).min(self.selected.len());
        let rows = self.selected[self.position..end].to_vec();
        // Columns are tracked as they are published so a failure part way
        // through is freed by the next release.
        for (field, table_idx) in self.projection.iter().enumerate() {
            let encoded = if self.emittable[field] {
                encode_column(&self.arena, &self.table.columns()[*table_idx], &rows)
                    .map_err(|e| exception(e.to_string()))?
            } else {
                EncodedColumn::unsupported()
            };
            self.outstanding.columns.push(Some(encoded));
        }
        let columns: Vec<EncodedColumn> =
            self.outstanding.columns.iter().flatten().cloned().collect();
        let meta = encode_meta(&self.arena, rows.len(), &columns);
        self.outstanding.meta = Some(meta);
        self.position = end;
        Ok(meta)
    }

    fn release_column(&mut self, column_index: usize) -> BoundaryResult<()> {
        self.journal.record(ScannerCall::ReleaseColumn(column_index));
        if column_index >= self.projection.len() {
            return Err(exception(format!(
                "column index {column_index} out of range"
            )));
        }
        self.release_column_regions(column_index);
        Ok(())
    }

    fn release_table(&mut self) -> BoundaryResult<()> {
        self.journal.record(ScannerCall::ReleaseTable);
        self.release_outstanding();
        Ok(())
    }

    fn close(&mut self) -> BoundaryResult<()> {
        self.journal.record(ScannerCall::Close);
        self.release_outstanding();
        self.closed = true;
        Ok(())
    }
}
