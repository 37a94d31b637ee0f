// crates/kudos-store/src/lib.rs
//
// kudos-store: Storage layer for the Kudos Protocol.
//
// Provides the in-memory, append-only ledger (chain + circulating supply)
// and read-only post/claims stores seeded from JSON files. Nothing here
// persists across restarts.

pub mod ledger;
pub mod posts;

// Re-export key types for ergonomic access from downstream crates.
pub use ledger::LedgerStore;
pub use posts::{ClaimRecord, InMemoryClaimsLedger, InMemoryPostStore, PostRecord};
