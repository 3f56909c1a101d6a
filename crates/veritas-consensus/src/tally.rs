// crates/veritas-consensus/src/tally.rs
//
// Vote tallying.
//
// The consensus decision is a simple-majority percentage over accuracy
// verdicts. Kept as a pure function so the math can be traced in tests
// without a store or ledger.

use serde::{Deserialize, Serialize};

/// The outcome of tallying one content item's votes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TallyOutcome {
    /// Whether the accurate share reached the approval threshold.
    pub approved: bool,
    /// Percentage of votes marking the content accurate, 0.0-100.0.
    pub score: f64,
}

/// Tally `accurate` out of `total` votes against `threshold_percent`.
///
/// The score is the percentage of accurate votes; approval requires the
/// score to reach the threshold, inclusive. Zero total votes yields a
/// not-approved outcome with a score of 0.0 rather than dividing by
/// zero; callers treat that as "no decision".
pub fn tally_votes(accurate: usize, total: usize, threshold_percent: f64) -> TallyOutcome {
    if total == 0 {
        return TallyOutcome {
            approved: false,
            score: 0.0,
        };
    }

    let score = 100.0 * accurate as f64 / total as f64;
    TallyOutcome {
        approved: score >= threshold_percent,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_votes() {
        let outcome = tally_votes(0, 0, 75.0);
        assert!(!outcome.approved);
        assert_eq!(outcome.score, 0.0);
    }

    #[test]
    fn test_unanimous_accurate() {
        let outcome = tally_votes(3, 3, 75.0);
        assert!(outcome.approved);
        assert_eq!(outcome.score, 100.0);
    }

    #[test]
    fn test_unanimous_inaccurate() {
        let outcome = tally_votes(0, 3, 75.0);
        assert!(!outcome.approved);
        assert_eq!(outcome.score, 0.0);
    }

    #[test]
    fn test_two_thirds_below_default_threshold() {
        // 2/3 accurate = 66.67%, short of 75%.
        let outcome = tally_votes(2, 3, 75.0);
        assert!(!outcome.approved);
        assert!((outcome.score - 200.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_two_thirds_clears_lower_threshold() {
        // Same votes, 60% threshold: approved.
        let outcome = tally_votes(2, 3, 60.0);
        assert!(outcome.approved);
        assert!((outcome.score - 200.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_exactly_at_threshold_approves() {
        // 3/4 accurate = 75.0% exactly; the bound is inclusive.
        let outcome = tally_votes(3, 4, 75.0);
        assert!(outcome.approved);
        assert_eq!(outcome.score, 75.0);
    }

    #[test]
    fn test_hundred_percent_threshold_requires_unanimity() {
        assert!(!tally_votes(3, 4, 100.0).approved);
        assert!(tally_votes(4, 4, 100.0).approved);
    }

    #[test]
    fn test_zero_threshold_approves_any_voted_item() {
        // 0 >= 0 holds, so even a unanimous-inaccurate item passes a
        // zero threshold. A configured threshold of 0 means "any votes
        // at all approve".
        let outcome = tally_votes(0, 3, 0.0);
        assert!(outcome.approved);
        assert_eq!(outcome.score, 0.0);
    }
}
