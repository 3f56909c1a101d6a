// crates/veritas-consensus/src/evaluator.rs
//
// Consensus evaluation over stored votes.
//
// The evaluator reads the votes cast on a content item, tallies them,
// and settles the consequences: each vote is annotated with whether it
// agreed with the outcome, and each voter's reputation moves through the
// ledger. It never mutates the content item itself; acting on the
// decision (status transition, persistence) is the caller's job, which
// is what keeps a failed evaluation from leaving a decided item with
// half-settled votes.

use std::sync::Arc;

use uuid::Uuid;

use veritas_core::config::ValidationConfig;
use veritas_core::error::VeritasError;
use veritas_core::traits::ValidationStore;
use veritas_reputation::ledger::ReputationLedger;

use crate::tally::tally_votes;

/// The result of evaluating one content item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsensusDecision {
    /// Whether the item reached the approval threshold.
    pub approved: bool,
    /// Percentage of accurate votes, 0.0-100.0.
    pub score: f64,
    /// Number of votes tallied.
    pub votes: usize,
}

/// Evaluates consensus for content items and settles voter reputation.
pub struct ConsensusEvaluator {
    store: Arc<dyn ValidationStore>,
    ledger: Arc<ReputationLedger>,
    config: ValidationConfig,
}

impl ConsensusEvaluator {
    pub fn new(
        store: Arc<dyn ValidationStore>,
        ledger: Arc<ReputationLedger>,
        config: ValidationConfig,
    ) -> Self {
        Self {
            store,
            ledger,
            config,
        }
    }

    /// Evaluate the votes cast on a content item.
    ///
    /// With zero votes this returns a not-approved decision with a score
    /// of 0.0 and touches nothing. Otherwise every vote is settled: the
    /// vote record gains its agreement flag and assessed delta, and the
    /// voter's reputation moves through the ledger.
    ///
    /// Maliciousness is never assessed here; callers apply that penalty
    /// through the ledger directly when behavior is flagged.
    ///
    /// # Errors
    /// Propagates store and ledger failures. Votes are settled in
    /// insertion order, so an error can leave earlier votes settled;
    /// callers must not act on the decision unless this returns `Ok`.
    pub async fn evaluate(&self, content_id: &Uuid) -> Result<ConsensusDecision, VeritasError> {
        // Step 1: Load the votes. No votes means no decision.
        let votes = self.store.list_votes_for_content(content_id).await?;
        if votes.is_empty() {
            return Ok(ConsensusDecision {
                approved: false,
                score: 0.0,
                votes: 0,
            });
        }

        // Step 2: Tally accuracy verdicts against the threshold.
        let accurate = votes.iter().filter(|v| v.is_accurate).count();
        let outcome = tally_votes(accurate, votes.len(), self.config.consensus_threshold_percent);

        // Step 3: Settle every voter against the outcome.
        for vote in &votes {
            let agreed = vote.is_accurate == outcome.approved;
            let delta = self.ledger.delta_for(agreed, false);
            self.ledger
                .update_reputation(&vote.validator_id, agreed, false)
                .await?;
            self.store
                .record_vote_outcome(content_id, &vote.validator_id, agreed, delta)
                .await?;
        }

        Ok(ConsensusDecision {
            approved: outcome.approved,
            score: outcome.score,
            votes: votes.len(),
        })
    }
}
