// crates/veritas-review/src/events.rs
//
// Review event types broadcast from the orchestrator to observers.
//
// The orchestrator publishes events on a tokio broadcast channel.
// Subscribers (notification fan-out, audit sinks, test harnesses)
// receive every lifecycle step; delivery is best-effort and never
// blocks review.

use uuid::Uuid;

use veritas_core::dispute::DisputeStatus;

/// Events emitted as content moves through the review pipeline.
#[derive(Debug, Clone)]
pub enum ReviewEvent {
    /// Content was submitted and entered review.
    Submitted {
        /// The new content item.
        content_id: Uuid,
    },
    /// A vote was accepted.
    VoteRecorded {
        /// The content item voted on.
        content_id: Uuid,
        /// The validator who cast the vote.
        validator_id: String,
    },
    /// Consensus was reached and the item left review.
    Decided {
        /// The decided content item.
        content_id: Uuid,
        /// Whether the item was approved.
        approved: bool,
        /// Percentage of accurate votes, 0.0-100.0.
        score: f64,
    },
    /// A dispute was filed and the item was marked disputed.
    Disputed {
        /// The disputed content item.
        content_id: Uuid,
        /// The newly filed dispute.
        dispute_id: Uuid,
    },
    /// A dispute moved to a resolution state.
    DisputeResolved {
        /// The dispute that moved.
        dispute_id: Uuid,
        /// Its new status.
        status: DisputeStatus,
    },
}
