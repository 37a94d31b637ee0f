// crates/kudos-core/src/lib.rs
//
// kudos-core: Core types, traits, and hashing primitives for the Kudos Protocol.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the ledger data structures (transactions, blocks, chains), the
// protocol error type, canonical block hashing, and the trait interfaces for
// the external collaborators a node talks to (post store, claims ledger, peers).

pub mod block;
pub mod crypto;
pub mod error;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use kudos_core::Block;`

// Ledger types
pub use block::{claimed_in_chain, Block, Chain, Transaction, GENESIS_PREVIOUS_HASH};

// Hashing
pub use crypto::{canonical_json, hash_block};

// Error type
pub use error::KudosError;

// Traits
pub use traits::{ClaimsLedger, PeerTransport, PostStore};
