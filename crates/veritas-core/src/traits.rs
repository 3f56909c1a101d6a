// crates/veritas-core/src/traits.rs
//
// Storage abstractions. The validation pipeline is written against these
// traits so backends can be swapped without touching component logic.
// Methods that check-then-act (unique inserts, reputation updates) are
// required to be atomic with respect to concurrent callers; the contract
// lives here rather than in any one backend.

use async_trait::async_trait;
use uuid::Uuid;

use crate::content::{ContentItem, ContentStatus};
use crate::dispute::Dispute;
use crate::error::VeritasError;
use crate::validator::Validator;
use crate::vote::VoteRecord;

/// Storage for content items.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Insert or overwrite a content item.
    async fn save_content(&self, item: &ContentItem) -> Result<(), VeritasError>;

    /// Fetch a content item by id.
    async fn get_content(&self, id: &Uuid) -> Result<Option<ContentItem>, VeritasError>;

    /// List all content items in the given status, ordered by submission
    /// time (ties broken by id).
    async fn list_content_by_status(
        &self,
        status: &ContentStatus,
    ) -> Result<Vec<ContentItem>, VeritasError>;
}

/// Storage for validators.
///
/// There is deliberately no blanket save: reputation and activity fields
/// are mutated through the atomic operations below so concurrent updates
/// cannot overwrite each other.
#[async_trait]
pub trait ValidatorStore: Send + Sync {
    /// Insert a new validator.
    ///
    /// # Errors
    /// Returns `VeritasError::AlreadyExists` if the id is taken. The
    /// existence check and insert are a single atomic step.
    async fn insert_validator(&self, validator: &Validator) -> Result<(), VeritasError>;

    /// Fetch a validator by id.
    async fn get_validator(&self, id: &str) -> Result<Option<Validator>, VeritasError>;

    /// List all validators, ordered by id.
    async fn list_validators(&self) -> Result<Vec<Validator>, VeritasError>;

    /// Atomically add `delta` to a validator's reputation, flooring the
    /// result at zero, and return the new value.
    ///
    /// # Errors
    /// Returns `VeritasError::NotFound` if the validator is unknown.
    async fn apply_reputation_delta(&self, id: &str, delta: f64) -> Result<f64, VeritasError>;

    /// Atomically stamp a validator's `last_seen_at` with the current time.
    ///
    /// # Errors
    /// Returns `VeritasError::NotFound` if the validator is unknown.
    async fn touch_validator(&self, id: &str) -> Result<(), VeritasError>;

    /// Atomically set a validator's active flag, returning the updated
    /// record.
    ///
    /// # Errors
    /// Returns `VeritasError::NotFound` if the validator is unknown.
    async fn set_validator_active(
        &self,
        id: &str,
        active: bool,
    ) -> Result<Validator, VeritasError>;
}

/// Storage for votes.
///
/// Votes are keyed by `(content_id, validator_id)`; the store enforces
/// the one-vote-per-validator-per-item rule.
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// Insert a new vote.
    ///
    /// # Errors
    /// Returns `VeritasError::DuplicateVote` if this validator already
    /// voted on this content item. The uniqueness check and insert are a
    /// single atomic step.
    async fn insert_vote(&self, vote: &VoteRecord) -> Result<(), VeritasError>;

    /// Fetch a vote by its composite key.
    async fn get_vote(
        &self,
        content_id: &Uuid,
        validator_id: &str,
    ) -> Result<Option<VoteRecord>, VeritasError>;

    /// List all votes for a content item, in insertion order.
    async fn list_votes_for_content(
        &self,
        content_id: &Uuid,
    ) -> Result<Vec<VoteRecord>, VeritasError>;

    /// Count the votes cast on a content item.
    async fn count_votes_for_content(&self, content_id: &Uuid) -> Result<usize, VeritasError>;

    /// Record a vote's consensus outcome: whether it agreed and the
    /// reputation delta assessed for it.
    ///
    /// # Errors
    /// Returns `VeritasError::NotFound` if no such vote exists.
    async fn record_vote_outcome(
        &self,
        content_id: &Uuid,
        validator_id: &str,
        agreed: bool,
        delta: f64,
    ) -> Result<(), VeritasError>;
}

/// Storage for disputes.
#[async_trait]
pub trait DisputeStore: Send + Sync {
    /// Insert a new dispute.
    ///
    /// # Errors
    /// Returns `VeritasError::AlreadyExists` if the id is taken.
    async fn insert_dispute(&self, dispute: &Dispute) -> Result<(), VeritasError>;

    /// Fetch a dispute by id.
    async fn get_dispute(&self, id: &Uuid) -> Result<Option<Dispute>, VeritasError>;

    /// Overwrite an existing dispute (used for resolution updates).
    async fn save_dispute(&self, dispute: &Dispute) -> Result<(), VeritasError>;

    /// List all disputes filed against a content item, in filing order.
    async fn list_disputes_for_content(
        &self,
        content_id: &Uuid,
    ) -> Result<Vec<Dispute>, VeritasError>;
}

/// The full storage surface the validation pipeline runs against.
///
/// Blanket-implemented for anything that implements all four stores, so a
/// backend only has to implement the pieces.
pub trait ValidationStore: ContentStore + ValidatorStore + VoteStore + DisputeStore {}

impl<T: ContentStore + ValidatorStore + VoteStore + DisputeStore> ValidationStore for T {}
