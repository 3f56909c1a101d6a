// crates/veritas-core/src/validator.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered validator in the network.
///
/// Validators are keyed by a caller-supplied string identifier (typically a
/// node or account id). Reputation lives here but is only ever mutated
/// through the reputation ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Validator {
    /// Caller-supplied unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional affiliated organization.
    pub organization: Option<String>,
    /// Subject areas this validator claims expertise in.
    pub specialties: Vec<String>,
    /// Current reputation score. Never negative.
    pub reputation: f64,
    /// Whether the validator participates in panel selection.
    pub active: bool,
    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
    /// Last recorded activity (vote submission or explicit touch).
    pub last_seen_at: DateTime<Utc>,
}

impl Validator {
    /// Create a new active validator with the given starting reputation.
    pub fn new(
        id: &str,
        name: &str,
        organization: Option<String>,
        specialties: Vec<String>,
        initial_reputation: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.to_string(),
            name: name.to_string(),
            organization,
            specialties,
            reputation: initial_reputation,
            active: true,
            registered_at: now,
            last_seen_at: now,
        }
    }

    /// Whether this validator qualifies for panel selection.
    ///
    /// The reputation bound is inclusive: a validator sitting exactly at
    /// the minimum is eligible.
    pub fn is_eligible(&self, min_reputation: f64) -> bool {
        self.active && self.reputation >= min_reputation
    }
}
