// crates/kudos-core/src/traits.rs

use async_trait::async_trait;

use crate::block::{Block, Chain};
use crate::error::KudosError;

/// Read-only lookup of the likes recorded for a post.
///
/// Implemented by kudos-store (in-memory / JSON seed file).
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Return the like count for `key`, or `None` if the post does not exist.
    async fn likes(&self, key: &str) -> Result<Option<u64>, KudosError>;
}

/// Read-only source of coins already claimed against a post.
///
/// Implemented by the local ledger (sum over committed blocks) and by the
/// external claims ledger in kudos-store.
#[async_trait]
pub trait ClaimsLedger: Send + Sync {
    /// Total coins already claimed against `key`. Unknown keys report 0.
    async fn claimed_coins(&self, key: &str) -> Result<u64, KudosError>;
}

/// Outbound calls a node makes to its peers.
///
/// Implemented by kudos-p2p over HTTP. Every call is expected to be bounded
/// by a timeout; callers treat any error as "peer unreachable".
#[async_trait]
pub trait PeerTransport: Send + Sync {
    /// Ask `peer` to review a candidate block. `Ok(true)` is an explicit approval.
    async fn request_approval(&self, peer: &str, block: &Block) -> Result<bool, KudosError>;

    /// Push a committed block to `peer`.
    async fn push_block(&self, peer: &str, block: &Block) -> Result<(), KudosError>;

    /// Fetch `peer`'s full chain.
    async fn fetch_chain(&self, peer: &str) -> Result<Chain, KudosError>;

    /// Register `self_address` with `peer`.
    async fn announce(&self, peer: &str, self_address: &str) -> Result<(), KudosError>;
}
