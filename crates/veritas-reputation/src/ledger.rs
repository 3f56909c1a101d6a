// crates/veritas-reputation/src/ledger.rs
//
// The reputation ledger.
//
// Single authority for validator standing: registration, lookups, panel
// selection, and every reputation change go through here. The ledger
// computes signed deltas from the configured policy and delegates the
// actual update to the store's atomic primitives, so concurrent updates
// to one validator cannot overwrite each other.

use std::sync::Arc;

use veritas_core::config::ValidationConfig;
use veritas_core::error::VeritasError;
use veritas_core::traits::ValidationStore;
use veritas_core::validator::Validator;

use crate::selection::rank_eligible;

/// Manages validator registration, reputation, and panel selection.
pub struct ReputationLedger {
    store: Arc<dyn ValidationStore>,
    config: ValidationConfig,
}

impl ReputationLedger {
    pub fn new(store: Arc<dyn ValidationStore>, config: ValidationConfig) -> Self {
        Self { store, config }
    }

    /// Register a new validator with the configured initial reputation.
    ///
    /// # Errors
    /// Returns `VeritasError::AlreadyExists` if the id is taken.
    pub async fn register(
        &self,
        id: &str,
        name: &str,
        organization: Option<String>,
        specialties: Vec<String>,
    ) -> Result<Validator, VeritasError> {
        let validator = Validator::new(
            id,
            name,
            organization,
            specialties,
            self.config.initial_reputation,
        );
        self.store.insert_validator(&validator).await?;
        Ok(validator)
    }

    /// Current reputation of a validator.
    ///
    /// Unknown ids report the configured initial reputation without
    /// creating a record; lookups never write.
    pub async fn reputation_of(&self, id: &str) -> Result<f64, VeritasError> {
        let reputation = self
            .store
            .get_validator(id)
            .await?
            .map(|v| v.reputation)
            .unwrap_or(self.config.initial_reputation);
        Ok(reputation)
    }

    /// The signed reputation delta the policy assesses for a vote outcome.
    ///
    /// A malicious flag dominates: the penalty applies regardless of
    /// whether the vote agreed with consensus.
    pub fn delta_for(&self, agreed_with_consensus: bool, malicious: bool) -> f64 {
        if malicious {
            -self.config.reputation_loss_malicious
        } else if agreed_with_consensus {
            self.config.reputation_gain_correct
        } else {
            -self.config.reputation_loss_incorrect
        }
    }

    /// Apply the policy delta for a vote outcome and return the new
    /// reputation. The store floors the result at zero.
    ///
    /// # Errors
    /// Returns `VeritasError::NotFound` if the validator is unknown.
    pub async fn update_reputation(
        &self,
        id: &str,
        agreed_with_consensus: bool,
        malicious: bool,
    ) -> Result<f64, VeritasError> {
        let delta = self.delta_for(agreed_with_consensus, malicious);
        self.store.apply_reputation_delta(id, delta).await
    }

    /// Select up to `count` validators for a review panel.
    ///
    /// Considers active validators at or above the configured selection
    /// minimum, ranked by reputation. Can return fewer than `count` if
    /// the eligible pool is small.
    pub async fn select_eligible(&self, count: usize) -> Result<Vec<Validator>, VeritasError> {
        let validators = self.store.list_validators().await?;
        Ok(rank_eligible(
            validators,
            self.config.min_reputation_for_selection,
            count,
        ))
    }

    /// Set a validator's active flag, returning the updated record.
    ///
    /// # Errors
    /// Returns `VeritasError::NotFound` if the validator is unknown.
    pub async fn set_active(&self, id: &str, active: bool) -> Result<Validator, VeritasError> {
        self.store.set_validator_active(id, active).await
    }

    /// Stamp a validator's last-seen time with the current time.
    ///
    /// # Errors
    /// Returns `VeritasError::NotFound` if the validator is unknown.
    pub async fn record_activity(&self, id: &str) -> Result<(), VeritasError> {
        self.store.touch_validator(id).await
    }
}
