use std::collections::HashMap;

use bytes::Bytes;
use tracing::debug;

use crate::engine::bridge::predicate::scan_predicate::ScanPredicate;
use crate::engine::bridge::predicate::value_range::ColumnValueRange;
use crate::engine::bridge::predicate::wire::{SIZE_I32, write_len};
use crate::engine::errors::BridgeError;

/// Serialized push-down predicates, kept alive by the connector for as long as
/// the scanner that was given their address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateBuffer {
    bytes: Bytes,
    count: usize,
}

impl PredicateBuffer {
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of predicates encoded.
    pub fn predicate_count(&self) -> usize {
        self.count
    }
}

/// Expands every column range into predicates, ordered by column name.
pub fn build_predicates(ranges: &HashMap<String, ColumnValueRange>) -> Vec<ScanPredicate> {
    let mut columns: Vec<&String> = ranges.keys().collect();
    columns.sort();
    columns
        .into_iter()
        .flat_map(|name| ranges[name].to_predicates(name))
        .collect()
}

/// Serializes `ranges` into one contiguous buffer.
///
/// Returns `None` when there is nothing to push down: no map, an empty map, or
/// only ranges that expand to no predicate.
pub fn serialize_predicates(
    ranges: Option<&HashMap<String, ColumnValueRange>>,
) -> Result<Option<PredicateBuffer>, BridgeError> {
    let Some(ranges) = ranges else {
        return Ok(None);
    };
    let predicates = build_predicates(ranges);
    if predicates.is_empty() {
        return Ok(None);
    }

    let total = SIZE_I32 + predicates.iter().map(|p| p.encoded_len()).sum::<usize>();
    let mut out = Vec::with_capacity(total);
    write_len(&mut out, predicates.len())
        .ok_or_else(|| BridgeError::InvalidArgument("too many predicates".into()))?;
    for predicate in &predicates {
        predicate.write_to(&mut out)?;
    }
    debug_assert_eq!(out.len(), total);
    debug!(
        predicates = predicates.len(),
        bytes = out.len(),
        "serialized push-down predicates"
    );

    Ok(Some(PredicateBuffer {
        bytes: Bytes::from(out),
        count: predicates.len(),
    }))
}
