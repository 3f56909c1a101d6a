// crates/veritas-consensus/src/lib.rs
//
// veritas-consensus: Consensus evaluation and vote settlement for the
// Veritas content-validation network.
//
// This crate decides whether reviewed content is approved from the votes
// cast on it, and settles the reputation consequences for every voter
// through the reputation ledger. The vote math itself is a pure function
// in `tally`; `evaluator` wires it to storage and the ledger.

pub mod evaluator;
pub mod tally;
