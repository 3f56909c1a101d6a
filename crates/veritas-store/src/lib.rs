// crates/veritas-store/src/lib.rs
//
// veritas-store: Storage backends for the Veritas content-validation
// network.
//
// Backends implement the store traits from veritas-core. The in-memory
// backend here is the reference implementation of the atomicity contracts
// those traits require; it is also what the test suites run against.

pub mod memory;

pub use memory::MemoryStore;
