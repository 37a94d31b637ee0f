// crates/kudos-p2p/src/peers.rs
//
// PeerRegistry: the set of known peer addresses plus this node's own
// announce address and the fixed bootstrap list it discovers from.

use std::collections::BTreeSet;

use tokio::sync::RwLock;

/// Manages the set of known peers.
///
/// Membership is a deduplicated set; `members()` returns a sorted snapshot so
/// fan-out order and `/nodes/register` responses are stable.
#[derive(Debug)]
pub struct PeerRegistry {
    /// This node's address as announced to bootstrap peers.
    self_address: String,
    /// Fixed bootstrap addresses the discovery loop announces to.
    bootstrap_peers: Vec<String>,
    /// Known peers.
    members: RwLock<BTreeSet<String>>,
}

impl PeerRegistry {
    /// Create a registry with no members yet.
    pub fn new(self_address: impl Into<String>, bootstrap_peers: Vec<String>) -> Self {
        Self {
            self_address: self_address.into(),
            bootstrap_peers,
            members: RwLock::new(BTreeSet::new()),
        }
    }

    /// This node's announce address.
    pub fn self_address(&self) -> &str {
        &self.self_address
    }

    /// The configured bootstrap addresses.
    pub fn bootstrap_peers(&self) -> &[String] {
        &self.bootstrap_peers
    }

    /// Add peers to the set. Idempotent; blank addresses are ignored.
    ///
    /// Returns the number of addresses that were newly added.
    pub async fn register<I, S>(&self, addresses: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut members = self.members.write().await;
        let mut added = 0;
        for address in addresses {
            let address = address.as_ref().trim();
            if address.is_empty() {
                continue;
            }
            if members.insert(address.to_string()) {
                tracing::info!("Registered peer {}", address);
                added += 1;
            }
        }
        added
    }

    /// Point-in-time snapshot of known peers.
    pub async fn members(&self) -> Vec<String> {
        self.members.read().await.iter().cloned().collect()
    }

    pub async fn contains(&self, address: &str) -> bool {
        self.members.read().await.contains(address)
    }

    /// Return the number of known peers.
    pub async fn len(&self) -> usize {
        self.members.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.members.read().await.is_empty()
    }
}
