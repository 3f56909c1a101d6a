// crates/veritas-reputation/src/selection.rs
//
// Panel selection ranking.
//
// Ranking is a pure function over a snapshot of the validator set, so it
// can be exercised without a store. Eligibility and ordering rules live
// here in one place; the ledger feeds it the current snapshot.

use std::cmp::Ordering;

use veritas_core::validator::Validator;

/// Rank validators for panel selection and take the top `count`.
///
/// Filters to active validators at or above `min_reputation`, then orders
/// by reputation descending. Ties break by earlier registration, then by
/// id, so identical snapshots always produce identical panels.
pub fn rank_eligible(
    validators: Vec<Validator>,
    min_reputation: f64,
    count: usize,
) -> Vec<Validator> {
    let mut eligible: Vec<Validator> = validators
        .into_iter()
        .filter(|v| v.is_eligible(min_reputation))
        .collect();

    eligible.sort_by(|a, b| {
        b.reputation
            .partial_cmp(&a.reputation)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.registered_at.cmp(&b.registered_at))
            .then_with(|| a.id.cmp(&b.id))
    });

    eligible.truncate(count);
    eligible
}
