use std::collections::HashMap;

use tracing::{debug, error, info, warn};

use crate::engine::bridge::boundary::{
    BoundaryException, RuntimeProvider, ScannerHandle, ScannerRuntime,
};
use crate::engine::bridge::decoder::fill_column;
use crate::engine::bridge::meta_cursor::MetaCursor;
use crate::engine::bridge::predicate::{ColumnValueRange, PredicateBuffer, serialize_predicates};
use crate::engine::bridge::type_name::columns_types_param;
use crate::engine::core::Block;
use crate::engine::errors::BridgeError;
use crate::engine::types::TypeDescriptor;

/// Parameter carrying the decimal address of the predicate buffer.
pub const PUSH_DOWN_PREDICATES: &str = "push_down_predicates";
/// Comma-joined column names, in declared order.
pub const REQUIRED_FIELDS: &str = "required_fields";
/// `#`-joined scanner type names, parallel to `required_fields`.
pub const COLUMNS_TYPES: &str = "columns_types";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorState {
    Unopened,
    Opened,
    /// A batch has been handed out and not yet fully released.
    BatchReady,
    Closed,
}

/// Outcome of one `get_next_block` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextBlock {
    pub rows_read: usize,
    pub eof: bool,
}

impl NextBlock {
    fn end_of_stream() -> Self {
        Self {
            rows_read: 0,
            eof: true,
        }
    }
}

/// Drives one foreign scanner and decodes its batches into local blocks.
///
/// Everything the connector talks to arrives through `open`; there is no
/// ambient environment. One instance is used by one thread at a time.
pub struct BatchConnector<R: ScannerRuntime> {
    scanner_class: String,
    scanner_params: HashMap<String, String>,
    column_names: Vec<String>,
    predicates: Option<PredicateBuffer>,
    predicates_addr: Option<u64>,
    runtime: Option<R>,
    scanner: Option<R::Handle>,
    state: ConnectorState,
    rows_read: usize,
}

impl<R: ScannerRuntime> BatchConnector<R> {
    pub fn new(
        scanner_class: impl Into<String>,
        scanner_params: HashMap<String, String>,
        column_names: Vec<String>,
    ) -> Self {
        Self {
            scanner_class: scanner_class.into(),
            scanner_params,
            column_names,
            predicates: None,
            predicates_addr: None,
            runtime: None,
            scanner: None,
            state: ConnectorState::Unopened,
            rows_read: 0,
        }
    }

    /// Connector whose scanner is told the expected output layout through
    /// `required_fields` and `columns_types`.
    pub fn for_schema<S: AsRef<str>>(
        scanner_class: impl Into<String>,
        mut scanner_params: HashMap<String, String>,
        schema: &[(S, TypeDescriptor)],
    ) -> Self {
        let column_names: Vec<String> = schema
            .iter()
            .map(|(name, _)| name.as_ref().to_string())
            .collect();
        scanner_params.insert(REQUIRED_FIELDS.to_string(), column_names.join(","));
        scanner_params.insert(
            COLUMNS_TYPES.to_string(),
            columns_types_param(schema.iter().map(|(_, desc)| desc)),
        );
        Self::new(scanner_class, scanner_params, column_names)
    }

    pub fn state(&self) -> ConnectorState {
        self.state
    }

    /// Rows decoded over the connector's lifetime.
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    pub fn scanner_params(&self) -> &HashMap<String, String> {
        &self.scanner_params
    }

    pub fn predicates(&self) -> Option<&PredicateBuffer> {
        self.predicates.as_ref()
    }

    /// Serializes the push-down ranges for the next `open`. A `None` or empty
    /// map leaves nothing staged.
    pub fn init(
        &mut self,
        ranges: Option<&HashMap<String, ColumnValueRange>>,
    ) -> Result<(), BridgeError> {
        if self.state != ConnectorState::Unopened {
            return Err(BridgeError::InvalidState(format!(
                "init called in state {:?}",
                self.state
            )));
        }
        self.predicates = serialize_predicates(ranges)?;
        if let Some(buf) = &self.predicates {
            debug!(
                predicates = buf.predicate_count(),
                bytes = buf.len(),
                "staged push-down predicates"
            );
        }
        Ok(())
    }

    /// Acquires an environment, constructs the scanner and runs its `open`.
    ///
    /// Whatever was acquired before a failure stays owned by the connector and
    /// is released by `close`, or by the next `open` before it acquires again.
    pub fn open<P>(&mut self, provider: &P, batch_size: usize) -> Result<(), BridgeError>
    where
        P: RuntimeProvider<Runtime = R>,
    {
        if self.state != ConnectorState::Unopened {
            return Err(BridgeError::InvalidState(format!(
                "open called in state {:?}",
                self.state
            )));
        }
        if self.scanner.is_some() || self.runtime.is_some() {
            debug!("releasing scanner left by a failed open");
            if let Some(e) = self.release_handles() {
                self.state = ConnectorState::Closed;
                let err = BridgeError::ReleaseFailed(e.to_string());
                err.log_error();
                return Err(err);
            }
        }

        let runtime = provider
            .acquire()
            .map_err(|e| BridgeError::EnvUnavailable(e.to_string()))?;
        let runtime = self.runtime.insert(runtime);

        if let Some(buf) = &self.predicates {
            let addr = runtime.expose(buf.bytes().clone())?;
            self.predicates_addr = Some(addr);
            self.scanner_params
                .insert(PUSH_DOWN_PREDICATES.to_string(), addr.to_string());
        }

        let scanner =
            runtime.instantiate(&self.scanner_class, batch_size, &self.scanner_params)?;
        self.scanner.insert(scanner).open()?;

        self.state = ConnectorState::Opened;
        info!(
            class = %self.scanner_class,
            batch_size,
            columns = self.column_names.len(),
            pushed_down = self.predicates_addr.is_some(),
            "scanner opened"
        );
        Ok(())
    }

    /// Decodes the next batch into `block`, appending to its columns.
    ///
    /// On error the batch is abandoned in place; the caller is expected to
    /// `close`, which releases it.
    pub fn get_next_block(&mut self, block: &mut Block) -> Result<NextBlock, BridgeError> {
        if self.state != ConnectorState::Opened {
            return Err(BridgeError::InvalidState(format!(
                "get_next_block called in state {:?}",
                self.state
            )));
        }
        let (Some(runtime), Some(scanner)) = (self.runtime.as_ref(), self.scanner.as_mut()) else {
            return Err(BridgeError::InvalidState("scanner not initialized".into()));
        };

        let meta_addr = scanner.get_next_batch_meta()?;
        if meta_addr == 0 {
            debug!("scanner exhausted");
            return Ok(NextBlock::end_of_stream());
        }
        self.state = ConnectorState::BatchReady;

        let mut cursor = MetaCursor::new(runtime.memory());
        cursor.set(meta_addr);
        let num_rows = cursor.next_as_count()?;
        if num_rows == 0 {
            scanner.release_table()?;
            self.state = ConnectorState::Opened;
            debug!("empty batch, treating as end of stream");
            return Ok(NextBlock::end_of_stream());
        }

        for (idx, name) in self.column_names.iter().enumerate() {
            let target = block.get_by_name_mut(name)?;
            let logical = target.data_type.logical;
            if let Err(e) = fill_column(&mut target.column, logical, num_rows, &mut cursor) {
                warn!(column = %name, error = %e, "column decode failed");
                return Err(e.with_column(name));
            }
            scanner.release_column(idx)?;
        }
        scanner.release_table()?;

        self.rows_read += num_rows;
        self.state = ConnectorState::Opened;
        debug!(
            rows = num_rows,
            total = self.rows_read,
            slots = cursor.slots_read(),
            "batch decoded"
        );
        Ok(NextBlock {
            rows_read: num_rows,
            eof: false,
        })
    }

    /// Releases the current batch and closes the scanner. Idempotent.
    ///
    /// A raise during this sequence is returned as `ReleaseFailed`; the
    /// connector is closed either way and the foreign handle is dropped.
    pub fn close(&mut self) -> Result<(), BridgeError> {
        if self.state == ConnectorState::Closed {
            return Ok(());
        }

        let failure = self.release_handles();
        self.state = ConnectorState::Closed;

        match failure {
            Some(e) => {
                let err = BridgeError::ReleaseFailed(e.to_string());
                err.log_error();
                Err(err)
            }
            None => {
                info!(
                    class = %self.scanner_class,
                    rows_read = self.rows_read,
                    "scanner closed"
                );
                Ok(())
            }
        }
    }

    /// Releases the table, closes the scanner, then revokes the predicate
    /// buffer and drops the runtime. Every step runs; the first raise wins.
    fn release_handles(&mut self) -> Option<BoundaryException> {
        let mut failure = None;
        if let Some(mut scanner) = self.scanner.take() {
            if let Err(e) = scanner.release_table() {
                failure.get_or_insert(e);
            }
            if let Err(e) = scanner.close() {
                failure.get_or_insert(e);
            }
        }
        if let (Some(runtime), Some(addr)) = (self.runtime.as_mut(), self.predicates_addr.take()) {
            runtime.revoke(addr);
        }
        self.runtime = None;
        failure
    }
}

impl<R: ScannerRuntime> Drop for BatchConnector<R> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            error!(error = %e, "unrecoverable scanner release failure, aborting");
            std::process::abort();
        }
    }
}
