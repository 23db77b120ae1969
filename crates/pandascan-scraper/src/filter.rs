//! Fee-cap filtering of extracted records.

use pandascan_core::ListingRecord;

/// Retains records whose `delivery_fee` is absent or at most `cap`.
///
/// Order-preserving and idempotent: filtering an already-filtered list with
/// the same cap returns it unchanged. An absent fee is kept — "unknown" is
/// not the same as "too expensive".
#[must_use]
pub fn apply_fee_cap(records: Vec<ListingRecord>, cap: f64) -> Vec<ListingRecord> {
    let before = records.len();
    let kept: Vec<ListingRecord> = records
        .into_iter()
        .filter(|record| record.delivery_fee.is_none_or(|fee| fee <= cap))
        .collect();
    if kept.len() < before {
        tracing::debug!(dropped = before - kept.len(), cap, "fee cap applied");
    }
    kept
}
