// crates/veritas-core/src/content.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::VeritasError;

/// Lifecycle states of a content item, from submission through consensus.
///
///   Pending --> InReview --> Approved
///                  |             |
///                  v             v
///               Rejected --> Disputed
///
/// `Disputed` is reachable from `InReview`, `Approved`, and `Rejected` via
/// dispute submission, and is terminal for this core: resolving the linked
/// dispute finalizes the dispute record only and never moves the content
/// item back into review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ContentStatus {
    /// Created by submission, not yet assigned for review.
    Pending,
    /// Under active review; validators are casting votes.
    InReview,
    /// Consensus reached the approval threshold.
    Approved,
    /// Consensus fell short of the approval threshold.
    Rejected,
    /// A dispute was filed against the item's current outcome.
    Disputed,
}

impl ContentStatus {
    /// Stable snake_case tag for index keys and log lines.
    ///
    /// Kept separate from `Debug` so the wire/index representation cannot
    /// drift if variants gain payloads later.
    pub fn tag(&self) -> &'static str {
        match self {
            ContentStatus::Pending => "pending",
            ContentStatus::InReview => "in_review",
            ContentStatus::Approved => "approved",
            ContentStatus::Rejected => "rejected",
            ContentStatus::Disputed => "disputed",
        }
    }

    /// Whether `next` is a valid transition from this state.
    ///
    /// Encodes the nominal machine above. The dispute path intentionally
    /// bypasses this check: filing a dispute forces `Disputed` regardless
    /// of the prior status (see `ContentItem::mark_disputed`).
    pub fn can_transition(&self, next: &ContentStatus) -> bool {
        matches!(
            (self, next),
            (ContentStatus::Pending, ContentStatus::InReview)
                | (ContentStatus::InReview, ContentStatus::Approved)
                | (ContentStatus::InReview, ContentStatus::Rejected)
                | (ContentStatus::InReview, ContentStatus::Disputed)
                | (ContentStatus::Approved, ContentStatus::Disputed)
                | (ContentStatus::Rejected, ContentStatus::Disputed)
        )
    }
}

impl std::fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A unit of submitted content under review.
///
/// Created on submission and never deleted; outcomes supersede each other
/// through status transitions. `approved` and `consensus_score` are
/// meaningful only once `decided_at` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique identifier (UUID v7 for time-ordering).
    pub id: Uuid,
    /// Short human-readable title.
    pub title: String,
    /// The submitted body text.
    pub body: String,
    /// Optional source reference (e.g., the URL the content was taken from).
    pub source_url: Option<String>,
    /// Optional author reference.
    pub author_id: Option<String>,
    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,
    /// Current lifecycle state.
    pub status: ContentStatus,
    /// Whether consensus approved the item. Meaningful only once decided.
    pub approved: bool,
    /// Percentage of accurate votes at decision time, 0.0-100.0.
    pub consensus_score: f64,
    /// When consensus was reached, if it has been.
    pub decided_at: Option<DateTime<Utc>>,
}

impl ContentItem {
    /// Create a new content item in the `Pending` state.
    pub fn new(
        title: &str,
        body: &str,
        source_url: Option<String>,
        author_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: title.to_string(),
            body: body.to_string(),
            source_url,
            author_id,
            submitted_at: Utc::now(),
            status: ContentStatus::Pending,
            approved: false,
            consensus_score: 0.0,
            decided_at: None,
        }
    }

    /// Move the item to `next`, validating against the nominal machine.
    ///
    /// # Errors
    /// Returns `VeritasError::InvalidState` if the transition is not valid
    /// from the current status.
    pub fn transition(&mut self, next: ContentStatus) -> Result<(), VeritasError> {
        if !self.status.can_transition(&next) {
            return Err(VeritasError::InvalidState(format!(
                "content {} cannot move from {} to {}",
                self.id, self.status, next
            )));
        }
        self.status = next;
        Ok(())
    }

    /// Apply a consensus decision: set the outcome fields and leave review.
    ///
    /// Valid only while the item is `InReview`.
    pub fn record_decision(&mut self, approved: bool, score: f64) -> Result<(), VeritasError> {
        let next = if approved {
            ContentStatus::Approved
        } else {
            ContentStatus::Rejected
        };
        self.transition(next)?;
        self.approved = approved;
        self.consensus_score = score;
        self.decided_at = Some(Utc::now());
        Ok(())
    }

    /// Force the item into `Disputed`, regardless of its prior status.
    ///
    /// Dispute submission is unconditional by contract, so this setter does
    /// not consult `can_transition`. Idempotent for already-disputed items.
    pub fn mark_disputed(&mut self) {
        self.status = ContentStatus::Disputed;
    }
}
