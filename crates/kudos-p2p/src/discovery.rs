// crates/kudos-p2p/src/discovery.rs
//
// Bootstrap discovery: periodically announce this node to every bootstrap
// peer that is not yet a member, and adopt the ones that accept.

use std::sync::Arc;
use std::time::Duration;

use kudos_core::traits::PeerTransport;

use crate::peers::PeerRegistry;

/// Run one discovery round.
///
/// For each bootstrap address not already known, POSTs this node's address
/// to the peer's `/nodes/register`; on success the bootstrap peer joins our
/// own membership. Failures are logged and left for the next round.
///
/// Returns the number of bootstrap peers newly connected.
pub async fn discover_once(registry: &PeerRegistry, transport: &dyn PeerTransport) -> usize {
    let mut connected = 0;

    for peer in registry.bootstrap_peers() {
        if registry.contains(peer).await {
            continue;
        }

        match transport.announce(peer, registry.self_address()).await {
            Ok(()) => {
                registry.register([peer.as_str()]).await;
                tracing::info!("Connected to bootstrap peer {}", peer);
                connected += 1;
            }
            Err(e) => {
                tracing::warn!("Could not connect to {}, will retry: {}", peer, e);
            }
        }
    }

    connected
}

/// Run the discovery loop forever, one round every `interval`.
///
/// The first round fires immediately.
pub async fn run_discovery_loop(
    registry: Arc<PeerRegistry>,
    transport: Arc<dyn PeerTransport>,
    interval: Duration,
) {
    tracing::info!(
        "Peer discovery started ({} bootstrap peers, every {:?})",
        registry.bootstrap_peers().len(),
        interval
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        ticker.tick().await;
        let connected = discover_once(&registry, transport.as_ref()).await;
        tracing::debug!(
            "Discovery round done: {} new, {} known peers",
            connected,
            registry.len().await
        );
    }
}
