// crates/kudos-sync/src/reconcile.rs
//
// Longest-chain reconciliation: fetch each peer's chain and replace the local
// chain with the longest one observed.

use std::sync::Arc;

use kudos_core::traits::PeerTransport;
use kudos_core::Chain;
use kudos_store::LedgerStore;

/// Pick the longest of `local` and `candidates`.
///
/// A candidate wins only if strictly longer than the best seen so far, so on
/// ties the earlier chain (the local one first) is kept.
pub fn longest_chain<I>(local: Chain, candidates: I) -> Chain
where
    I: IntoIterator<Item = Chain>,
{
    candidates.into_iter().fold(local, |longest, candidate| {
        if candidate.len() > longest.len() {
            candidate
        } else {
            longest
        }
    })
}

/// Pulls peer chains and applies the longest-chain rule.
#[derive(Clone)]
pub struct ChainReconciler {
    transport: Arc<dyn PeerTransport>,
}

impl ChainReconciler {
    pub fn new(transport: Arc<dyn PeerTransport>) -> Self {
        Self { transport }
    }

    /// Fetch every peer's chain concurrently, in peer order, skipping
    /// peers that fail.
    pub async fn fetch_chains(&self, peers: &[String]) -> Vec<Chain> {
        let fetches = peers.iter().map(|peer| async move {
            match self.transport.fetch_chain(peer).await {
                Ok(chain) => {
                    tracing::debug!("Sync: peer {} has {} blocks", peer, chain.len());
                    Some(chain)
                }
                Err(e) => {
                    tracing::debug!("Sync: could not reach peer {}: {}", peer, e);
                    None
                }
            }
        });

        futures::future::join_all(fetches)
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    /// Return the longest of `local` and every reachable peer's chain.
    pub async fn reconcile(&self, peers: &[String], local: Chain) -> Chain {
        let fetched = self.fetch_chains(peers).await;
        longest_chain(local, fetched)
    }

    /// Reconcile `ledger` against `peers` and return the resulting chain.
    ///
    /// Peer chains are fetched without holding any ledger lock. The
    /// comparison and replacement then run under the writer lock against
    /// the chain as it is at that moment, so a claim committed during the
    /// fetch is never silently discarded by a chain of equal length.
    pub async fn sync_ledger(&self, ledger: &LedgerStore, peers: &[String]) -> Chain {
        let fetched = self.fetch_chains(peers).await;

        let _guard = ledger.writer().await;
        let local = ledger.snapshot().await;
        let local_len = local.len();
        let longest = longest_chain(local, fetched);

        if longest.len() > local_len {
            tracing::info!(
                "Sync: adopting chain of {} blocks (local had {})",
                longest.len(),
                local_len
            );
            ledger.replace(longest.clone()).await;
        } else {
            tracing::trace!("Sync: local chain of {} blocks is longest", local_len);
        }

        longest
    }
}
