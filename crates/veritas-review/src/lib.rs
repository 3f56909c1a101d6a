// crates/veritas-review/src/lib.rs
//
// veritas-review: Validation orchestration for the Veritas
// content-validation network.
//
// The orchestrator is the system's entry surface: content submission,
// vote intake, consensus triggering, and dispute handling. It composes
// the store, the reputation ledger, and the consensus evaluator, holds
// a per-content-item lock across each check-then-act window, and
// broadcasts review events for observers.

pub mod events;
pub mod locks;
pub mod orchestrator;

// Re-export key types for ergonomic access from downstream crates.
pub use events::ReviewEvent;
pub use orchestrator::ReviewOrchestrator;
