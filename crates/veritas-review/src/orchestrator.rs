// crates/veritas-review/src/orchestrator.rs
//
// Validation orchestration for the Veritas content-validation network.
//
// Wires the store, the reputation ledger, and the consensus evaluator
// into the system's entry surface: submission, vote intake, consensus
// triggering, and dispute handling. Every check-then-act window runs
// under the per-content-item lock so the vote that crosses the
// threshold triggers consensus exactly once.

use std::sync::Arc;

use tokio::sync::broadcast;
use uuid::Uuid;

use veritas_consensus::evaluator::ConsensusEvaluator;
use veritas_core::config::ValidationConfig;
use veritas_core::content::{ContentItem, ContentStatus};
use veritas_core::dispute::{Dispute, DisputeStatus};
use veritas_core::error::VeritasError;
use veritas_core::traits::ValidationStore;
use veritas_core::validator::Validator;
use veritas_core::vote::VoteRecord;
use veritas_reputation::ledger::ReputationLedger;

use crate::events::ReviewEvent;
use crate::locks::ContentLocks;

/// Broadcast capacity for review events. Slow subscribers lag and drop
/// rather than backpressure review.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Coordinates the full review lifecycle of submitted content.
pub struct ReviewOrchestrator {
    store: Arc<dyn ValidationStore>,
    ledger: Arc<ReputationLedger>,
    evaluator: ConsensusEvaluator,
    config: ValidationConfig,
    locks: ContentLocks,
    events: broadcast::Sender<ReviewEvent>,
}

impl ReviewOrchestrator {
    pub fn new(
        store: Arc<dyn ValidationStore>,
        ledger: Arc<ReputationLedger>,
        evaluator: ConsensusEvaluator,
        config: ValidationConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            store,
            ledger,
            evaluator,
            config,
            locks: ContentLocks::new(),
            events,
        }
    }

    /// Subscribe to review events. Each subscriber gets every event
    /// emitted after the subscription.
    pub fn subscribe(&self) -> broadcast::Receiver<ReviewEvent> {
        self.events.subscribe()
    }

    /// Accept new content and move it into review.
    ///
    /// Steps:
    /// 1. Persist the item in its initial pending state
    /// 2. Suggest a review panel from the eligible validator pool
    /// 3. Transition to in-review and persist
    ///
    /// The panel is advisory: it sizes and seeds reviewer outreach, but
    /// votes are accepted from any registered validator. All three steps
    /// run under the item's lock; a dispute filed against the newly
    /// visible item waits and then lands on the in-review record.
    pub async fn submit(
        &self,
        title: &str,
        body: &str,
        source_url: Option<String>,
        author_id: Option<String>,
    ) -> Result<ContentItem, VeritasError> {
        let mut item = ContentItem::new(title, body, source_url, author_id);

        // The first save publishes the id, and a dispute can target the
        // item from that moment on. Both status writes happen under the
        // item's lock so a racing dispute is never overwritten. The
        // acquisition cannot contend: nobody else knows the id yet.
        let _guard = self.locks.acquire(&item.id).await;

        // Step 1: Persist in the initial state.
        self.store.save_content(&item).await?;

        // Step 2: Suggest a panel.
        let panel = self
            .ledger
            .select_eligible(self.config.min_validators_per_content)
            .await?;
        let panel_ids: Vec<&str> = panel.iter().map(|v| v.id.as_str()).collect();
        tracing::debug!("Content {}: suggested panel {:?}", item.id, panel_ids);

        // Step 3: Enter review.
        item.transition(ContentStatus::InReview)?;
        self.store.save_content(&item).await?;

        tracing::info!(
            "Content {}: submitted and entered review ({} panelist(s) suggested)",
            item.id,
            panel.len()
        );
        self.emit(ReviewEvent::Submitted {
            content_id: item.id,
        });
        Ok(item)
    }

    /// Accept a validator's vote on a content item.
    ///
    /// Steps:
    /// 1. Verify the content item and validator exist
    /// 2. Record the vote under the item's lock
    /// 3. Stamp validator activity
    /// 4. Trigger consensus if this vote crossed the threshold
    ///
    /// Votes on already-decided items are recorded for the audit trail
    /// but do not re-open consensus. The returned record reflects any
    /// settlement that happened in step 4.
    ///
    /// # Errors
    /// Returns `VeritasError::NotFound` if the content item or validator
    /// is unknown, and `VeritasError::DuplicateVote` if this validator
    /// already voted on this item.
    pub async fn submit_vote(
        &self,
        content_id: &Uuid,
        validator_id: &str,
        is_accurate: bool,
        is_plagiarized: bool,
        bias_score: f64,
        comment: Option<String>,
    ) -> Result<VoteRecord, VeritasError> {
        // Step 1: Both sides of the vote must exist.
        self.store
            .get_content(content_id)
            .await?
            .ok_or_else(|| VeritasError::NotFound(format!("content {}", content_id)))?;
        self.store
            .get_validator(validator_id)
            .await?
            .ok_or_else(|| VeritasError::NotFound(format!("validator {}", validator_id)))?;

        let vote = VoteRecord::new(
            *content_id,
            validator_id,
            is_accurate,
            is_plagiarized,
            bias_score,
            comment,
        );

        // Steps 2-4 run under the item's lock so the threshold check and
        // any resulting status write cannot interleave with other votes.
        let _guard = self.locks.acquire(content_id).await;

        self.store.insert_vote(&vote).await?;
        self.ledger.record_activity(validator_id).await?;
        tracing::debug!("Content {}: vote recorded from {}", content_id, validator_id);
        self.emit(ReviewEvent::VoteRecorded {
            content_id: *content_id,
            validator_id: validator_id.to_string(),
        });

        self.maybe_decide(content_id).await?;

        // Return the stored record, which carries settlement annotations
        // if this vote triggered consensus.
        let stored = self
            .store
            .get_vote(content_id, validator_id)
            .await?
            .unwrap_or(vote);
        Ok(stored)
    }

    /// Run consensus if the item is still in review and has enough votes.
    ///
    /// Caller must hold the item's lock. The status transition happens
    /// only after evaluation fully succeeds, and moving the item out of
    /// in-review here is what makes the trigger once-only: later votes
    /// see a decided item and skip.
    async fn maybe_decide(&self, content_id: &Uuid) -> Result<(), VeritasError> {
        let mut item = self
            .store
            .get_content(content_id)
            .await?
            .ok_or_else(|| VeritasError::NotFound(format!("content {}", content_id)))?;
        if item.status != ContentStatus::InReview {
            return Ok(());
        }

        let votes = self.store.count_votes_for_content(content_id).await?;
        if votes < self.config.min_validators_per_content {
            return Ok(());
        }

        let decision = self.evaluator.evaluate(content_id).await?;
        item.record_decision(decision.approved, decision.score)?;
        self.store.save_content(&item).await?;

        tracing::info!(
            "Content {}: consensus reached, {} with score {:.2} over {} vote(s)",
            content_id,
            if decision.approved { "approved" } else { "rejected" },
            decision.score,
            decision.votes
        );
        self.emit(ReviewEvent::Decided {
            content_id: *content_id,
            approved: decision.approved,
            score: decision.score,
        });
        Ok(())
    }

    /// File a dispute against a content item.
    ///
    /// Filing is unconditional: the item moves to disputed from whatever
    /// status it holds, including mid-review or after a decision.
    ///
    /// # Errors
    /// Returns `VeritasError::NotFound` if the content item is unknown.
    pub async fn submit_dispute(
        &self,
        content_id: &Uuid,
        disputer_id: &str,
        reason: &str,
    ) -> Result<Dispute, VeritasError> {
        self.store
            .get_content(content_id)
            .await?
            .ok_or_else(|| VeritasError::NotFound(format!("content {}", content_id)))?;

        let dispute = Dispute::new(*content_id, disputer_id, reason);

        // The status write must not interleave with a consensus decision
        // on the same item.
        let _guard = self.locks.acquire(content_id).await;

        self.store.insert_dispute(&dispute).await?;
        let mut item = self
            .store
            .get_content(content_id)
            .await?
            .ok_or_else(|| VeritasError::NotFound(format!("content {}", content_id)))?;
        item.mark_disputed();
        self.store.save_content(&item).await?;

        tracing::info!(
            "Content {}: disputed by {} (dispute {})",
            content_id,
            disputer_id,
            dispute.id
        );
        self.emit(ReviewEvent::Disputed {
            content_id: *content_id,
            dispute_id: dispute.id,
        });
        Ok(dispute)
    }

    /// Move a dispute to a resolution state.
    ///
    /// Resolution finalizes the dispute record only; the content item
    /// keeps its disputed status and decision fields untouched.
    ///
    /// # Errors
    /// Returns `VeritasError::NotFound` if the dispute is unknown, and
    /// `VeritasError::InvalidState` if it was already resolved.
    pub async fn resolve_dispute(
        &self,
        dispute_id: &Uuid,
        status: DisputeStatus,
        resolver_id: &str,
    ) -> Result<Dispute, VeritasError> {
        let found = self
            .store
            .get_dispute(dispute_id)
            .await?
            .ok_or_else(|| VeritasError::NotFound(format!("dispute {}", dispute_id)))?;

        // Serialize with other dispute activity on the same item, then
        // re-read so the terminality check sees the latest state.
        let _guard = self.locks.acquire(&found.content_id).await;
        let mut dispute = self
            .store
            .get_dispute(dispute_id)
            .await?
            .ok_or_else(|| VeritasError::NotFound(format!("dispute {}", dispute_id)))?;

        dispute.resolve(status, resolver_id)?;
        self.store.save_dispute(&dispute).await?;

        tracing::info!(
            "Dispute {}: moved to {} by {}",
            dispute.id,
            dispute.status,
            resolver_id
        );
        self.emit(ReviewEvent::DisputeResolved {
            dispute_id: dispute.id,
            status: dispute.status.clone(),
        });
        Ok(dispute)
    }

    /// Register a validator with the network.
    pub async fn register_validator(
        &self,
        id: &str,
        name: &str,
        organization: Option<String>,
        specialties: Vec<String>,
    ) -> Result<Validator, VeritasError> {
        let validator = self.ledger.register(id, name, organization, specialties).await?;
        tracing::info!("Validator {} registered", validator.id);
        Ok(validator)
    }

    /// Current reputation of a validator. Unknown ids report the
    /// configured initial reputation.
    pub async fn reputation_of(&self, validator_id: &str) -> Result<f64, VeritasError> {
        self.ledger.reputation_of(validator_id).await
    }

    /// Select up to `count` validators eligible for review panels.
    pub async fn select_eligible(&self, count: usize) -> Result<Vec<Validator>, VeritasError> {
        self.ledger.select_eligible(count).await
    }

    /// Set a validator's active flag, returning the updated record.
    pub async fn set_validator_active(
        &self,
        validator_id: &str,
        active: bool,
    ) -> Result<Validator, VeritasError> {
        self.ledger.set_active(validator_id, active).await
    }

    /// Fetch a content item.
    pub async fn content(&self, content_id: &Uuid) -> Result<Option<ContentItem>, VeritasError> {
        self.store.get_content(content_id).await
    }

    /// List content items in a given status, oldest first.
    pub async fn list_content_by_status(
        &self,
        status: &ContentStatus,
    ) -> Result<Vec<ContentItem>, VeritasError> {
        self.store.list_content_by_status(status).await
    }

    /// List the votes cast on a content item, in arrival order.
    pub async fn votes_for(&self, content_id: &Uuid) -> Result<Vec<VoteRecord>, VeritasError> {
        self.store.list_votes_for_content(content_id).await
    }

    /// List the disputes filed against a content item, in filing order.
    pub async fn disputes_for(&self, content_id: &Uuid) -> Result<Vec<Dispute>, VeritasError> {
        self.store.list_disputes_for_content(content_id).await
    }

    fn emit(&self, event: ReviewEvent) {
        // Best-effort: an absent or lagging subscriber never fails review.
        let _ = self.events.send(event);
    }
}
