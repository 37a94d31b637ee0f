// crates/kudos-p2p/src/transport.rs
//
// HTTP implementation of PeerTransport over a shared reqwest client.
//
// Peer endpoints:
//   POST {peer}/validate        {"block": ...}    -> 2xx means approved
//   POST {peer}/sync_block      {"block": ...}
//   GET  {peer}/chain                             -> {"chain": [...]}
//   POST {peer}/nodes/register  {"nodes": [...]}

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use kudos_core::traits::PeerTransport;
use kudos_core::{Block, Chain, KudosError};

/// Default per-request timeout for peer calls.
pub const DEFAULT_PEER_TIMEOUT_SECS: u64 = 5;

/// Body of `/validate` and `/sync_block`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockEnvelope {
    pub block: Block,
}

/// Body of a `/chain` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainEnvelope {
    pub chain: Chain,
}

/// Body of a `/nodes/register` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Vec<String>,
}

/// Build the URL for `path` on `address`.
///
/// Addresses may be bare `host:port` (plain HTTP is assumed) or full
/// `http://` / `https://` base URLs.
pub fn peer_url(address: &str, path: &str) -> String {
    let base = address.trim().trim_end_matches('/');
    if base.starts_with("http://") || base.starts_with("https://") {
        format!("{}{}", base, path)
    } else {
        format!("http://{}{}", base, path)
    }
}

/// PeerTransport over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpPeerTransport {
    /// Shared reqwest client for all outbound HTTP calls.
    client: reqwest::Client,
}

impl HttpPeerTransport {
    /// Create a transport whose every request is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }

    /// Return the shared reqwest::Client.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl Default for HttpPeerTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_PEER_TIMEOUT_SECS))
    }
}

fn network_error(peer: &str, e: reqwest::Error) -> KudosError {
    KudosError::Network(format!("{}: {}", peer, e))
}

#[async_trait]
impl PeerTransport for HttpPeerTransport {
    async fn request_approval(&self, peer: &str, block: &Block) -> Result<bool, KudosError> {
        let resp = self
            .client
            .post(peer_url(peer, "/validate"))
            .json(&BlockEnvelope {
                block: block.clone(),
            })
            .send()
            .await
            .map_err(|e| network_error(peer, e))?;

        if !resp.status().is_success() {
            tracing::debug!("Peer {} declined block {}: {}", peer, block.index, resp.status());
        }
        Ok(resp.status().is_success())
    }

    async fn push_block(&self, peer: &str, block: &Block) -> Result<(), KudosError> {
        let resp = self
            .client
            .post(peer_url(peer, "/sync_block"))
            .json(&BlockEnvelope {
                block: block.clone(),
            })
            .send()
            .await
            .map_err(|e| network_error(peer, e))?;

        if !resp.status().is_success() {
            return Err(KudosError::Network(format!(
                "{} returned status {}",
                peer,
                resp.status()
            )));
        }
        Ok(())
    }

    async fn fetch_chain(&self, peer: &str) -> Result<Chain, KudosError> {
        let resp = self
            .client
            .get(peer_url(peer, "/chain"))
            .send()
            .await
            .map_err(|e| network_error(peer, e))?;

        if !resp.status().is_success() {
            return Err(KudosError::Network(format!(
                "{} returned status {}",
                peer,
                resp.status()
            )));
        }

        let envelope: ChainEnvelope = resp.json().await.map_err(|e| {
            KudosError::Serialization(format!("Failed to parse chain from {}: {}", peer, e))
        })?;
        Ok(envelope.chain)
    }

    async fn announce(&self, peer: &str, self_address: &str) -> Result<(), KudosError> {
        let resp = self
            .client
            .post(peer_url(peer, "/nodes/register"))
            .json(&RegisterNodesRequest {
                nodes: vec![self_address.to_string()],
            })
            .send()
            .await
            .map_err(|e| network_error(peer, e))?;

        if !resp.status().is_success() {
            return Err(KudosError::Network(format!(
                "{} returned status {}",
                peer,
                resp.status()
            )));
        }
        Ok(())
    }
}
