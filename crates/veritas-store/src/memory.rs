// crates/veritas-store/src/memory.rs
//
// In-memory storage for the validation pipeline.
//
// Layout:
//   - `contents`, `validators`, `disputes`: primary maps keyed by id
//   - `votes`: keyed by `(content_id, validator_id)`, so the
//     one-vote-per-validator rule is a plain key collision
//   - `vote_order`, `disputes_by_content`: insertion-order indexes
//
// A single RwLock guards the whole state. Every check-then-act operation
// (unique inserts, reputation updates, activity stamps) runs under one
// continuous write guard, which is what makes those operations atomic
// for concurrent callers.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use veritas_core::content::{ContentItem, ContentStatus};
use veritas_core::dispute::Dispute;
use veritas_core::error::VeritasError;
use veritas_core::traits::{ContentStore, DisputeStore, ValidatorStore, VoteStore};
use veritas_core::validator::Validator;
use veritas_core::vote::VoteRecord;

#[derive(Debug, Default)]
struct MemoryState {
    contents: HashMap<Uuid, ContentItem>,
    validators: HashMap<String, Validator>,
    votes: HashMap<(Uuid, String), VoteRecord>,
    vote_order: HashMap<Uuid, Vec<String>>,
    disputes: HashMap<Uuid, Dispute>,
    disputes_by_content: HashMap<Uuid, Vec<Uuid>>,
}

/// In-memory store implementing the full `ValidationStore` surface.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryState>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryState::default()),
        }
    }

    /// Build the composite vote key: `(content_id, validator_id)`.
    fn vote_key(content_id: &Uuid, validator_id: &str) -> (Uuid, String) {
        (*content_id, validator_id.to_string())
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn save_content(&self, item: &ContentItem) -> Result<(), VeritasError> {
        let mut state = self.inner.write().await;
        state.contents.insert(item.id, item.clone());
        Ok(())
    }

    async fn get_content(&self, id: &Uuid) -> Result<Option<ContentItem>, VeritasError> {
        let state = self.inner.read().await;
        Ok(state.contents.get(id).cloned())
    }

    async fn list_content_by_status(
        &self,
        status: &ContentStatus,
    ) -> Result<Vec<ContentItem>, VeritasError> {
        let state = self.inner.read().await;
        let mut items: Vec<ContentItem> = state
            .contents
            .values()
            .filter(|item| item.status == *status)
            .cloned()
            .collect();
        // Deterministic order: submission time, then id.
        items.sort_by_key(|item| (item.submitted_at, item.id));
        Ok(items)
    }
}

#[async_trait]
impl ValidatorStore for MemoryStore {
    async fn insert_validator(&self, validator: &Validator) -> Result<(), VeritasError> {
        let mut state = self.inner.write().await;
        if state.validators.contains_key(&validator.id) {
            return Err(VeritasError::AlreadyExists(format!(
                "validator {}",
                validator.id
            )));
        }
        state
            .validators
            .insert(validator.id.clone(), validator.clone());
        Ok(())
    }

    async fn get_validator(&self, id: &str) -> Result<Option<Validator>, VeritasError> {
        let state = self.inner.read().await;
        Ok(state.validators.get(id).cloned())
    }

    async fn list_validators(&self) -> Result<Vec<Validator>, VeritasError> {
        let state = self.inner.read().await;
        let mut validators: Vec<Validator> = state.validators.values().cloned().collect();
        validators.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(validators)
    }

    async fn apply_reputation_delta(&self, id: &str, delta: f64) -> Result<f64, VeritasError> {
        let mut state = self.inner.write().await;
        let validator = state
            .validators
            .get_mut(id)
            .ok_or_else(|| VeritasError::NotFound(format!("validator {}", id)))?;
        validator.reputation = (validator.reputation + delta).max(0.0);
        Ok(validator.reputation)
    }

    async fn touch_validator(&self, id: &str) -> Result<(), VeritasError> {
        let mut state = self.inner.write().await;
        let validator = state
            .validators
            .get_mut(id)
            .ok_or_else(|| VeritasError::NotFound(format!("validator {}", id)))?;
        validator.last_seen_at = Utc::now();
        Ok(())
    }

    async fn set_validator_active(
        &self,
        id: &str,
        active: bool,
    ) -> Result<Validator, VeritasError> {
        let mut state = self.inner.write().await;
        let validator = state
            .validators
            .get_mut(id)
            .ok_or_else(|| VeritasError::NotFound(format!("validator {}", id)))?;
        validator.active = active;
        Ok(validator.clone())
    }
}

#[async_trait]
impl VoteStore for MemoryStore {
    async fn insert_vote(&self, vote: &VoteRecord) -> Result<(), VeritasError> {
        let mut state = self.inner.write().await;
        let key = Self::vote_key(&vote.content_id, &vote.validator_id);
        if state.votes.contains_key(&key) {
            return Err(VeritasError::DuplicateVote(format!(
                "validator {} already voted on content {}",
                vote.validator_id, vote.content_id
            )));
        }
        state.votes.insert(key, vote.clone());
        state
            .vote_order
            .entry(vote.content_id)
            .or_default()
            .push(vote.validator_id.clone());
        Ok(())
    }

    async fn get_vote(
        &self,
        content_id: &Uuid,
        validator_id: &str,
    ) -> Result<Option<VoteRecord>, VeritasError> {
        let state = self.inner.read().await;
        Ok(state
            .votes
            .get(&Self::vote_key(content_id, validator_id))
            .cloned())
    }

    async fn list_votes_for_content(
        &self,
        content_id: &Uuid,
    ) -> Result<Vec<VoteRecord>, VeritasError> {
        let state = self.inner.read().await;
        let order = match state.vote_order.get(content_id) {
            Some(order) => order,
            None => return Ok(Vec::new()),
        };
        let votes = order
            .iter()
            .filter_map(|validator_id| {
                state
                    .votes
                    .get(&Self::vote_key(content_id, validator_id))
                    .cloned()
            })
            .collect();
        Ok(votes)
    }

    async fn count_votes_for_content(&self, content_id: &Uuid) -> Result<usize, VeritasError> {
        let state = self.inner.read().await;
        Ok(state
            .vote_order
            .get(content_id)
            .map(|order| order.len())
            .unwrap_or(0))
    }

    async fn record_vote_outcome(
        &self,
        content_id: &Uuid,
        validator_id: &str,
        agreed: bool,
        delta: f64,
    ) -> Result<(), VeritasError> {
        let mut state = self.inner.write().await;
        let vote = state
            .votes
            .get_mut(&Self::vote_key(content_id, validator_id))
            .ok_or_else(|| {
                VeritasError::NotFound(format!(
                    "vote by {} on content {}",
                    validator_id, content_id
                ))
            })?;
        vote.agreed_with_consensus = Some(agreed);
        vote.reputation_delta = Some(delta);
        Ok(())
    }
}

#[async_trait]
impl DisputeStore for MemoryStore {
    async fn insert_dispute(&self, dispute: &Dispute) -> Result<(), VeritasError> {
        let mut state = self.inner.write().await;
        if state.disputes.contains_key(&dispute.id) {
            return Err(VeritasError::AlreadyExists(format!(
                "dispute {}",
                dispute.id
            )));
        }
        state.disputes.insert(dispute.id, dispute.clone());
        state
            .disputes_by_content
            .entry(dispute.content_id)
            .or_default()
            .push(dispute.id);
        Ok(())
    }

    async fn get_dispute(&self, id: &Uuid) -> Result<Option<Dispute>, VeritasError> {
        let state = self.inner.read().await;
        Ok(state.disputes.get(id).cloned())
    }

    async fn save_dispute(&self, dispute: &Dispute) -> Result<(), VeritasError> {
        let mut state = self.inner.write().await;
        state.disputes.insert(dispute.id, dispute.clone());
        // Keep the content index consistent for upserts of unseen disputes.
        let index = state
            .disputes_by_content
            .entry(dispute.content_id)
            .or_default();
        if !index.contains(&dispute.id) {
            index.push(dispute.id);
        }
        Ok(())
    }

    async fn list_disputes_for_content(
        &self,
        content_id: &Uuid,
    ) -> Result<Vec<Dispute>, VeritasError> {
        let state = self.inner.read().await;
        let ids = match state.disputes_by_content.get(content_id) {
            Some(ids) => ids,
            None => return Ok(Vec::new()),
        };
        let disputes = ids
            .iter()
            .filter_map(|id| state.disputes.get(id).cloned())
            .collect();
        Ok(disputes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn make_test_content(title: &str) -> ContentItem {
        ContentItem::new(title, "Body text", None, None)
    }

    fn make_test_validator(id: &str) -> Validator {
        Validator::new(id, "Test Validator", None, vec![], 100.0)
    }

    fn make_test_vote(content_id: Uuid, validator_id: &str, is_accurate: bool) -> VoteRecord {
        VoteRecord::new(content_id, validator_id, is_accurate, false, 0.0, None)
    }

    #[tokio::test]
    async fn test_save_and_get_content() {
        let store = MemoryStore::new();
        let item = make_test_content("Article");
        store.save_content(&item).await.unwrap();

        let fetched = store.get_content(&item.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, item.id);
        assert_eq!(fetched.title, "Article");
    }

    #[tokio::test]
    async fn test_get_missing_content_is_none() {
        let store = MemoryStore::new();
        assert!(store.get_content(&Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_content_by_status_filters_and_orders() {
        let store = MemoryStore::new();

        let mut early = make_test_content("Early");
        early.submitted_at = Utc::now() - Duration::hours(2);
        let mut late = make_test_content("Late");
        late.submitted_at = Utc::now() - Duration::hours(1);
        let mut other = make_test_content("Other status");
        other.status = ContentStatus::InReview;

        // Insert out of order to exercise the sort.
        store.save_content(&late).await.unwrap();
        store.save_content(&early).await.unwrap();
        store.save_content(&other).await.unwrap();

        let pending = store
            .list_content_by_status(&ContentStatus::Pending)
            .await
            .unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].title, "Early");
        assert_eq!(pending[1].title, "Late");
    }

    #[tokio::test]
    async fn test_insert_validator_duplicate_rejected() {
        let store = MemoryStore::new();
        store
            .insert_validator(&make_test_validator("val-1"))
            .await
            .unwrap();

        let err = store
            .insert_validator(&make_test_validator("val-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, VeritasError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_list_validators_ordered_by_id() {
        let store = MemoryStore::new();
        store
            .insert_validator(&make_test_validator("val-b"))
            .await
            .unwrap();
        store
            .insert_validator(&make_test_validator("val-a"))
            .await
            .unwrap();

        let validators = store.list_validators().await.unwrap();
        assert_eq!(validators[0].id, "val-a");
        assert_eq!(validators[1].id, "val-b");
    }

    #[tokio::test]
    async fn test_apply_reputation_delta_floors_at_zero() {
        let store = MemoryStore::new();
        store
            .insert_validator(&make_test_validator("val-1"))
            .await
            .unwrap();

        let after_loss = store
            .apply_reputation_delta("val-1", -150.0)
            .await
            .unwrap();
        assert_eq!(after_loss, 0.0, "reputation must floor at zero");

        // Recovery from the floor works normally.
        let after_gain = store.apply_reputation_delta("val-1", 5.0).await.unwrap();
        assert_eq!(after_gain, 5.0);
    }

    #[tokio::test]
    async fn test_apply_reputation_delta_unknown_validator() {
        let store = MemoryStore::new();
        let err = store
            .apply_reputation_delta("ghost", 5.0)
            .await
            .unwrap_err();
        assert!(matches!(err, VeritasError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_touch_validator_updates_last_seen() {
        let store = MemoryStore::new();
        let mut validator = make_test_validator("val-1");
        validator.last_seen_at = Utc::now() - Duration::hours(1);
        store.insert_validator(&validator).await.unwrap();

        store.touch_validator("val-1").await.unwrap();
        let fetched = store.get_validator("val-1").await.unwrap().unwrap();
        assert!(fetched.last_seen_at > validator.last_seen_at);
    }

    #[tokio::test]
    async fn test_set_validator_active_returns_updated() {
        let store = MemoryStore::new();
        store
            .insert_validator(&make_test_validator("val-1"))
            .await
            .unwrap();

        let updated = store.set_validator_active("val-1", false).await.unwrap();
        assert!(!updated.active);

        let fetched = store.get_validator("val-1").await.unwrap().unwrap();
        assert!(!fetched.active);
    }

    #[tokio::test]
    async fn test_insert_vote_duplicate_rejected() {
        let store = MemoryStore::new();
        let content_id = Uuid::now_v7();
        store
            .insert_vote(&make_test_vote(content_id, "val-1", true))
            .await
            .unwrap();

        let err = store
            .insert_vote(&make_test_vote(content_id, "val-1", false))
            .await
            .unwrap_err();
        assert!(matches!(err, VeritasError::DuplicateVote(_)));

        // Same validator on different content is fine.
        store
            .insert_vote(&make_test_vote(Uuid::now_v7(), "val-1", true))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_votes_listed_in_insertion_order() {
        let store = MemoryStore::new();
        let content_id = Uuid::now_v7();
        for id in ["val-3", "val-1", "val-2"] {
            store
                .insert_vote(&make_test_vote(content_id, id, true))
                .await
                .unwrap();
        }

        let votes = store.list_votes_for_content(&content_id).await.unwrap();
        let order: Vec<&str> = votes.iter().map(|v| v.validator_id.as_str()).collect();
        assert_eq!(order, vec!["val-3", "val-1", "val-2"]);
        assert_eq!(store.count_votes_for_content(&content_id).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_record_vote_outcome() {
        let store = MemoryStore::new();
        let content_id = Uuid::now_v7();
        store
            .insert_vote(&make_test_vote(content_id, "val-1", true))
            .await
            .unwrap();

        store
            .record_vote_outcome(&content_id, "val-1", true, 5.0)
            .await
            .unwrap();

        let vote = store.get_vote(&content_id, "val-1").await.unwrap().unwrap();
        assert_eq!(vote.agreed_with_consensus, Some(true));
        assert_eq!(vote.reputation_delta, Some(5.0));
    }

    #[tokio::test]
    async fn test_record_vote_outcome_unknown_vote() {
        let store = MemoryStore::new();
        let err = store
            .record_vote_outcome(&Uuid::now_v7(), "val-1", true, 5.0)
            .await
            .unwrap_err();
        assert!(matches!(err, VeritasError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_disputes_indexed_by_content() {
        let store = MemoryStore::new();
        let content_id = Uuid::now_v7();
        let first = Dispute::new(content_id, "val-1", "first challenge");
        let second = Dispute::new(content_id, "val-2", "second challenge");
        store.insert_dispute(&first).await.unwrap();
        store.insert_dispute(&second).await.unwrap();

        let disputes = store.list_disputes_for_content(&content_id).await.unwrap();
        assert_eq!(disputes.len(), 2);
        assert_eq!(disputes[0].id, first.id);
        assert_eq!(disputes[1].id, second.id);
    }

    #[tokio::test]
    async fn test_save_dispute_does_not_duplicate_index() {
        let store = MemoryStore::new();
        let content_id = Uuid::now_v7();
        let mut dispute = Dispute::new(content_id, "val-1", "challenge");
        store.insert_dispute(&dispute).await.unwrap();

        dispute
            .resolve(veritas_core::dispute::DisputeStatus::Resolved, "admin-1")
            .unwrap();
        store.save_dispute(&dispute).await.unwrap();

        let disputes = store.list_disputes_for_content(&content_id).await.unwrap();
        assert_eq!(disputes.len(), 1);
        assert_eq!(
            disputes[0].status,
            veritas_core::dispute::DisputeStatus::Resolved
        );
    }
}
