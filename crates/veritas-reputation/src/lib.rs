// crates/veritas-reputation/src/lib.rs
//
// veritas-reputation: Reputation ledger and validator selection for the
// Veritas content-validation network.
//
// This crate owns validator standing. All reputation mutation in the
// system passes through the ledger here, which applies the configured
// reward and penalty policy on top of the store's atomic update
// primitives. Panel selection ranks eligible validators by standing.

pub mod ledger;
pub mod selection;
