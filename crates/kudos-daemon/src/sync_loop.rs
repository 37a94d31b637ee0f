// crates/kudos-daemon/src/sync_loop.rs
//
// Background reconciliation loop: periodically pulls every known peer's chain
// and adopts the longest.

use std::sync::Arc;
use std::time::Duration;

use kudos_p2p::PeerRegistry;
use kudos_store::LedgerStore;
use kudos_sync::ChainReconciler;

/// Run one reconciliation round against the current peer set.
///
/// Returns the local chain length afterwards.
pub async fn sync_once(
    reconciler: &ChainReconciler,
    ledger: &LedgerStore,
    registry: &PeerRegistry,
) -> usize {
    let peers = registry.members().await;
    if peers.is_empty() {
        return ledger.len().await;
    }
    reconciler.sync_ledger(ledger, &peers).await.len()
}

/// Run the background sync loop.
///
/// The first round fires immediately so a restarted node catches up at
/// startup; later rounds run every `interval`.
pub async fn run_sync_loop(
    reconciler: ChainReconciler,
    ledger: Arc<LedgerStore>,
    registry: Arc<PeerRegistry>,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);

    loop {
        ticker.tick().await;
        let len = sync_once(&reconciler, &ledger, &registry).await;
        tracing::debug!("Sync round done: local chain has {} blocks", len);
    }
}
