// crates/veritas-core/src/vote.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single validator's assessment of a content item.
///
/// Votes are keyed by `(content_id, validator_id)`; a validator casts at
/// most one vote per item. The consensus fields at the bottom start as
/// `None` and are filled in when the item is evaluated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRecord {
    /// The content item being assessed.
    pub content_id: Uuid,
    /// The validator casting this vote.
    pub validator_id: String,
    /// The validator's accuracy verdict. This is the input to consensus.
    pub is_accurate: bool,
    /// Whether the validator flagged the content as plagiarized.
    pub is_plagiarized: bool,
    /// Perceived bias, clamped to [0.0, 1.0].
    pub bias_score: f64,
    /// Optional free-form justification.
    pub comment: Option<String>,
    /// When the vote was cast.
    pub submitted_at: DateTime<Utc>,
    /// Whether this vote matched the consensus outcome. Set at evaluation.
    pub agreed_with_consensus: Option<bool>,
    /// The reputation adjustment assessed for this vote. Set at
    /// evaluation. The ledger floors reputation at zero, so the change
    /// actually applied can be smaller in magnitude than this value.
    pub reputation_delta: Option<f64>,
}

impl VoteRecord {
    /// Create a new unevaluated vote. `bias_score` is clamped to [0.0, 1.0].
    pub fn new(
        content_id: Uuid,
        validator_id: &str,
        is_accurate: bool,
        is_plagiarized: bool,
        bias_score: f64,
        comment: Option<String>,
    ) -> Self {
        Self {
            content_id,
            validator_id: validator_id.to_string(),
            is_accurate,
            is_plagiarized,
            bias_score: bias_score.clamp(0.0, 1.0),
            comment,
            submitted_at: Utc::now(),
            agreed_with_consensus: None,
            reputation_delta: None,
        }
    }
}
