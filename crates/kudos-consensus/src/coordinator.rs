// crates/kudos-consensus/src/coordinator.rs
//
// ClaimCoordinator: turns a claim request into a committed block.
//
// The whole evaluate -> build -> gate -> commit sequence runs under the
// ledger's writer lock. Two concurrent claims for the same post therefore see
// each other's commits, and at most one of them can consume the last likes.
// Broadcast happens after the lock is released.

use std::sync::Arc;
use std::time::Duration;

use kudos_core::traits::{ClaimsLedger, PeerTransport, PostStore};
use kudos_core::{Block, KudosError};
use kudos_economics::ClaimEvaluator;
use kudos_p2p::{broadcast_block, PeerRegistry};
use kudos_store::LedgerStore;

use crate::gate::ConsensusGate;

/// A parsed claim request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRequest {
    pub key: String,
    pub password: String,
    /// Signed so that zero and negative requests can be rejected explicitly.
    pub coins: i64,
}

/// Runs claims against the local ledger and the peer approval gate.
pub struct ClaimCoordinator {
    evaluator: ClaimEvaluator,
    ledger: Arc<LedgerStore>,
    registry: Arc<PeerRegistry>,
    gate: ConsensusGate,
    transport: Arc<dyn PeerTransport>,
}

impl ClaimCoordinator {
    /// Create a coordinator. Prior claims are always read from `ledger`.
    pub fn new(
        posts: Arc<dyn PostStore>,
        ledger: Arc<LedgerStore>,
        registry: Arc<PeerRegistry>,
        transport: Arc<dyn PeerTransport>,
        total_circulation: u64,
        peer_timeout: Duration,
    ) -> Self {
        let claims: Arc<dyn ClaimsLedger> = ledger.clone();
        Self {
            evaluator: ClaimEvaluator::new(posts, claims, total_circulation),
            ledger,
            registry,
            gate: ConsensusGate::new(transport.clone(), peer_timeout),
            transport,
        }
    }

    pub fn evaluator(&self) -> &ClaimEvaluator {
        &self.evaluator
    }

    /// Process a claim end to end.
    ///
    /// On success the block has been appended locally and broadcast to every
    /// peer known at the time of the vote. On any error nothing is recorded.
    /// Identical requests are not deduplicated: a replay is simply evaluated
    /// again against the ceiling left by earlier commits.
    pub async fn claim(&self, request: &ClaimRequest) -> Result<Block, KudosError> {
        if request.coins <= 0 {
            return Err(KudosError::InvalidInput(format!(
                "coins must be a positive integer, got {}",
                request.coins
            )));
        }

        let guard = self.ledger.writer().await;

        let supply = self.ledger.supply().await;
        let tx = self
            .evaluator
            .evaluate_request(&request.key, &request.password, request.coins, supply)
            .await?;
        let block = self.ledger.build_candidate(vec![tx]).await?;

        let peers = self.registry.members().await;
        let approvals = self.gate.solicit_approvals(&block, &peers).await;
        if !ConsensusGate::is_majority(approvals, peers.len()) {
            let required = ConsensusGate::required_approvals(peers.len());
            tracing::warn!(
                "Rejected claim for {}: {}/{} approvals",
                request.key,
                approvals,
                required
            );
            return Err(KudosError::ConsensusRejected {
                approvals,
                required,
            });
        }

        self.ledger.commit(block.clone()).await;
        drop(guard);

        broadcast_block(self.transport.clone(), block.clone(), peers);
        Ok(block)
    }
}
