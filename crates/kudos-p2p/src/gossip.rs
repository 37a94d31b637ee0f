// crates/kudos-p2p/src/gossip.rs
//
// Single-hop gossip broadcast: push a committed block to all known peers.
// Fire-and-forget: failures are logged, never block the caller.

use std::sync::Arc;

use kudos_core::traits::PeerTransport;
use kudos_core::Block;

/// Broadcast a committed block to `peers` via `/sync_block`.
///
/// Spawns one task per peer and returns immediately. There is no
/// acknowledgement, retry, or ordering across peers. Peers do NOT
/// re-broadcast (single-hop only).
pub fn broadcast_block(transport: Arc<dyn PeerTransport>, block: Block, peers: Vec<String>) {
    if peers.is_empty() {
        return;
    }

    tracing::debug!("Broadcasting block {} to {} peers", block.index, peers.len());

    for peer in peers {
        let transport = transport.clone();
        let block = block.clone();

        tokio::spawn(async move {
            match transport.push_block(&peer, &block).await {
                Ok(()) => {
                    tracing::debug!("Pushed block {} to peer {}", block.index, peer);
                }
                Err(e) => {
                    tracing::warn!("Failed to push block {} to peer {}: {}", block.index, peer, e);
                }
            }
        });
    }
}
