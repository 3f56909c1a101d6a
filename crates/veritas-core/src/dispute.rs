// crates/veritas-core/src/dispute.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::VeritasError;

/// Lifecycle states of a dispute.
///
///   Open --> UnderReview --> Resolved
///     |                         ^
///     +-------------------------+
///
/// `Resolved` is terminal: a resolved dispute cannot be reopened or
/// re-resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DisputeStatus {
    /// Filed, awaiting attention.
    Open,
    /// Being examined by a resolver.
    UnderReview,
    /// Finalized with an outcome.
    Resolved,
}

impl DisputeStatus {
    /// Stable snake_case tag for index keys and log lines.
    pub fn tag(&self) -> &'static str {
        match self {
            DisputeStatus::Open => "open",
            DisputeStatus::UnderReview => "under_review",
            DisputeStatus::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for DisputeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A challenge filed against a content item's outcome.
///
/// Disputes reference their content item by id and carry their own
/// lifecycle; resolving one never mutates the content item itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dispute {
    /// Unique identifier (UUID v7 for time-ordering).
    pub id: Uuid,
    /// The content item this dispute targets.
    pub content_id: Uuid,
    /// Who filed the dispute.
    pub disputer_id: String,
    /// Stated grounds for the dispute.
    pub reason: String,
    /// Filing timestamp.
    pub submitted_at: DateTime<Utc>,
    /// Current lifecycle state.
    pub status: DisputeStatus,
    /// Who resolved the dispute, once resolved.
    pub resolved_by: Option<String>,
    /// When the dispute reached its current resolution state.
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Dispute {
    /// File a new dispute in the `Open` state.
    pub fn new(content_id: Uuid, disputer_id: &str, reason: &str) -> Self {
        Self {
            id: Uuid::now_v7(),
            content_id,
            disputer_id: disputer_id.to_string(),
            reason: reason.to_string(),
            submitted_at: Utc::now(),
            status: DisputeStatus::Open,
            resolved_by: None,
            resolved_at: None,
        }
    }

    /// Move the dispute to `status`, stamping resolver and time.
    ///
    /// Accepts any target status, including `UnderReview` for staged
    /// handling; the only guard is terminality.
    ///
    /// # Errors
    /// Returns `VeritasError::InvalidState` if the dispute is already
    /// `Resolved`.
    pub fn resolve(&mut self, status: DisputeStatus, resolver_id: &str) -> Result<(), VeritasError> {
        if self.status == DisputeStatus::Resolved {
            return Err(VeritasError::InvalidState(format!(
                "dispute {} is already resolved",
                self.id
            )));
        }
        self.status = status;
        self.resolved_by = Some(resolver_id.to_string());
        self.resolved_at = Some(Utc::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_dispute_is_open() {
        let dispute = Dispute::new(Uuid::now_v7(), "val-1", "factual error in paragraph 2");
        assert_eq!(dispute.status, DisputeStatus::Open);
        assert!(dispute.resolved_by.is_none());
        assert!(dispute.resolved_at.is_none());
    }

    #[test]
    fn test_resolve_stamps_resolver_and_time() {
        let mut dispute = Dispute::new(Uuid::now_v7(), "val-1", "reason");
        dispute.resolve(DisputeStatus::Resolved, "admin-1").unwrap();

        assert_eq!(dispute.status, DisputeStatus::Resolved);
        assert_eq!(dispute.resolved_by.as_deref(), Some("admin-1"));
        assert!(dispute.resolved_at.is_some());
    }

    #[test]
    fn test_resolve_twice_is_invalid() {
        let mut dispute = Dispute::new(Uuid::now_v7(), "val-1", "reason");
        dispute.resolve(DisputeStatus::Resolved, "admin-1").unwrap();

        let err = dispute
            .resolve(DisputeStatus::Resolved, "admin-2")
            .unwrap_err();
        assert!(matches!(err, VeritasError::InvalidState(_)));
        // First resolution stands.
        assert_eq!(dispute.resolved_by.as_deref(), Some("admin-1"));
    }

    #[test]
    fn test_staged_resolution_through_under_review() {
        let mut dispute = Dispute::new(Uuid::now_v7(), "val-1", "reason");
        dispute
            .resolve(DisputeStatus::UnderReview, "admin-1")
            .unwrap();
        assert_eq!(dispute.status, DisputeStatus::UnderReview);

        // Still resolvable from UnderReview.
        dispute.resolve(DisputeStatus::Resolved, "admin-1").unwrap();
        assert_eq!(dispute.status, DisputeStatus::Resolved);
    }

    #[test]
    fn test_status_tag_values() {
        assert_eq!(DisputeStatus::Open.tag(), "open");
        assert_eq!(DisputeStatus::UnderReview.tag(), "under_review");
        assert_eq!(DisputeStatus::Resolved.tag(), "resolved");
    }
}
