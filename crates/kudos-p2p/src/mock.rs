// crates/kudos-p2p/src/mock.rs
//
// Scriptable in-process PeerTransport for tests. Each peer address maps to a
// MockPeer describing how it answers; unknown addresses behave as unreachable.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use kudos_core::traits::PeerTransport;
use kudos_core::{Block, Chain, KudosError};

/// How a simulated peer responds.
#[derive(Debug, Clone, Default)]
pub struct MockPeer {
    /// Whether the peer answers at all.
    pub reachable: bool,
    /// Vote returned for approval requests.
    pub approve: bool,
    /// Chain returned by `fetch_chain`.
    pub chain: Chain,
    /// Artificial latency applied to every call.
    pub delay: Duration,
}

impl MockPeer {
    pub fn approving() -> Self {
        Self {
            reachable: true,
            approve: true,
            ..Self::default()
        }
    }

    pub fn rejecting() -> Self {
        Self {
            reachable: true,
            approve: false,
            ..Self::default()
        }
    }

    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn with_chain(mut self, chain: Chain) -> Self {
        self.chain = chain;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// In-process transport recording every push and announce it receives.
#[derive(Debug, Default)]
pub struct MockTransport {
    peers: HashMap<String, MockPeer>,
    pushed: Mutex<Vec<(String, Block)>>,
    announced: Mutex<Vec<(String, String)>>,
    approval_requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_peer(mut self, address: &str, peer: MockPeer) -> Self {
        self.peers.insert(address.to_string(), peer);
        self
    }

    /// `(peer, block)` pairs successfully pushed so far.
    pub fn pushed(&self) -> Vec<(String, Block)> {
        self.pushed.lock().map(|v| v.clone()).unwrap_or_default()
    }

    /// `(peer, self_address)` pairs successfully announced so far.
    pub fn announced(&self) -> Vec<(String, String)> {
        self.announced.lock().map(|v| v.clone()).unwrap_or_default()
    }

    /// Peers that were asked for an approval, reachable or not.
    pub fn approval_requests(&self) -> Vec<String> {
        self.approval_requests
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    async fn reach(&self, peer: &str) -> Result<&MockPeer, KudosError> {
        let behaviour = self
            .peers
            .get(peer)
            .ok_or_else(|| KudosError::Network(format!("unknown peer {}", peer)))?;
        if !behaviour.delay.is_zero() {
            tokio::time::sleep(behaviour.delay).await;
        }
        if !behaviour.reachable {
            return Err(KudosError::Network(format!("connection refused: {}", peer)));
        }
        Ok(behaviour)
    }
}

#[async_trait]
impl PeerTransport for MockTransport {
    async fn request_approval(&self, peer: &str, _block: &Block) -> Result<bool, KudosError> {
        if let Ok(mut requests) = self.approval_requests.lock() {
            requests.push(peer.to_string());
        }
        Ok(self.reach(peer).await?.approve)
    }

    async fn push_block(&self, peer: &str, block: &Block) -> Result<(), KudosError> {
        self.reach(peer).await?;
        if let Ok(mut pushed) = self.pushed.lock() {
            pushed.push((peer.to_string(), block.clone()));
        }
        Ok(())
    }

    async fn fetch_chain(&self, peer: &str) -> Result<Chain, KudosError> {
        Ok(self.reach(peer).await?.chain.clone())
    }

    async fn announce(&self, peer: &str, self_address: &str) -> Result<(), KudosError> {
        self.reach(peer).await?;
        if let Ok(mut announced) = self.announced.lock() {
            announced.push((peer.to_string(), self_address.to_string()));
        }
        Ok(())
    }
}
