use std::cmp::Ordering;
use std::ops::Bound;

use crate::engine::bridge::predicate::scan_predicate::{FilterOp, ScanPredicate};
use crate::engine::types::Datum;

/// Value constraint on one column, as handed over by the planner.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValueRange {
    /// Discrete set of admissible values.
    Fixed { values: Vec<Datum>, scale: u32 },
    /// Interval with independently open, closed or missing ends.
    Range {
        low: Bound<Datum>,
        high: Bound<Datum>,
        scale: u32,
    },
    IsNull,
}

impl ColumnValueRange {
    pub fn fixed(values: Vec<Datum>) -> Self {
        ColumnValueRange::Fixed { values, scale: 0 }
    }

    pub fn range(low: Bound<Datum>, high: Bound<Datum>) -> Self {
        ColumnValueRange::Range {
            low,
            high,
            scale: 0,
        }
    }

    pub fn between(low: Datum, high: Datum) -> Self {
        Self::range(Bound::Included(low), Bound::Included(high))
    }

    pub fn greater_than(value: Datum) -> Self {
        Self::range(Bound::Excluded(value), Bound::Unbounded)
    }

    pub fn at_least(value: Datum) -> Self {
        Self::range(Bound::Included(value), Bound::Unbounded)
    }

    pub fn less_than(value: Datum) -> Self {
        Self::range(Bound::Unbounded, Bound::Excluded(value))
    }

    pub fn at_most(value: Datum) -> Self {
        Self::range(Bound::Unbounded, Bound::Included(value))
    }

    pub fn is_null() -> Self {
        ColumnValueRange::IsNull
    }

    pub fn with_scale(mut self, new_scale: u32) -> Self {
        match &mut self {
            ColumnValueRange::Fixed { scale, .. } | ColumnValueRange::Range { scale, .. } => {
                *scale = new_scale
            }
            ColumnValueRange::IsNull => {}
        }
        self
    }

    pub fn scale(&self) -> u32 {
        match self {
            ColumnValueRange::Fixed { scale, .. } | ColumnValueRange::Range { scale, .. } => {
                *scale
            }
            ColumnValueRange::IsNull => 0,
        }
    }

    /// Expands the range into the predicates the scanner can evaluate.
    ///
    /// An empty result means the range adds nothing worth pushing down; the
    /// caller still filters locally.
    pub fn to_predicates(&self, column: &str) -> Vec<ScanPredicate> {
        match self {
            ColumnValueRange::Fixed { values, scale } => {
                if values.is_empty() {
                    return Vec::new();
                }
                vec![ScanPredicate::new(column, FilterOp::In, *scale, values.clone())]
            }
            ColumnValueRange::IsNull => {
                vec![ScanPredicate::new(column, FilterOp::IsNull, 0, Vec::new())]
            }
            ColumnValueRange::Range { low, high, scale } => {
                expand_range(column, low, high, *scale)
            }
        }
    }
}

fn expand_range(
    column: &str,
    low: &Bound<Datum>,
    high: &Bound<Datum>,
    scale: u32,
) -> Vec<ScanPredicate> {
    if let (Bound::Included(l) | Bound::Excluded(l), Bound::Included(h) | Bound::Excluded(h)) =
        (low, high)
    {
        match l.partial_cmp(h) {
            Some(Ordering::Less) => {}
            Some(Ordering::Equal) => {
                if let (Bound::Included(v), Bound::Included(_)) = (low, high) {
                    return vec![ScanPredicate::new(column, FilterOp::In, scale, vec![v.clone()])];
                }
                return Vec::new();
            }
            Some(Ordering::Greater) | None => return Vec::new(),
        }
    }

    let mut out = Vec::with_capacity(2);
    match low {
        Bound::Included(v) => out.push(ScanPredicate::new(
            column,
            FilterOp::LargerOrEqual,
            scale,
            vec![v.clone()],
        )),
        Bound::Excluded(v) => out.push(ScanPredicate::new(
            column,
            FilterOp::Larger,
            scale,
            vec![v.clone()],
        )),
        Bound::Unbounded => {}
    }
    match high {
        Bound::Included(v) => out.push(ScanPredicate::new(
            column,
            FilterOp::LessOrEqual,
            scale,
            vec![v.clone()],
        )),
        Bound::Excluded(v) => out.push(ScanPredicate::new(
            column,
            FilterOp::Less,
            scale,
            vec![v.clone()],
        )),
        Bound::Unbounded => {}
    }
    out
}
