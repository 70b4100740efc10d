//! Cross-statement merge: de-duplication and chronological ordering.
//!
//! Consecutive statements often cover overlapping periods, so the same
//! fill or cash movement can appear in more than one file. A record's
//! identity is `(symbol, side, qty, fill price, closing time)`. Commission
//! is left out so that one event reported with differently rounded fees
//! in two periods still collapses to a single row.

use crate::domain::record::{NormalizedRecord, Side};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Identity<'a> {
    symbol: &'a str,
    side: Side,
    qty_bits: u64,
    fill_price: &'a str,
    closing_time: &'a str,
}

impl<'a> Identity<'a> {
    fn of(r: &'a NormalizedRecord) -> Self {
        Self {
            symbol: &r.symbol,
            side: r.side,
            qty_bits: r.qty.to_bits(),
            fill_price: &r.fill_price,
            closing_time: &r.closing_time,
        }
    }
}

/// Keeps the first occurrence of each identity, in input order.
pub fn dedup(records: Vec<NormalizedRecord>) -> Vec<NormalizedRecord> {
    let keep: Vec<bool> = {
        let mut seen = HashSet::new();
        records
            .iter()
            .map(|r| seen.insert(Identity::of(r)))
            .collect()
    };
    records
        .into_iter()
        .zip(keep)
        .filter_map(|(r, k)| k.then_some(r))
        .collect()
}

/// Stable ascending sort on closing time; empty timestamps come first.
pub fn sort_chronologically(records: &mut [NormalizedRecord]) {
    records.sort_by(|a, b| a.closing_time.cmp(&b.closing_time));
}

/// Merges the concatenated output of every statement.
pub fn merge(records: Vec<NormalizedRecord>) -> Vec<NormalizedRecord> {
    let mut merged = dedup(records);
    sort_chronologically(&mut merged);
    merged
}
