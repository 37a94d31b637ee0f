// crates/kudos-consensus/src/gate.rs
//
// ConsensusGate: solicit approval votes for a candidate block from every
// known peer and decide commit/reject by simple majority.

use std::sync::Arc;
use std::time::Duration;

use kudos_core::traits::PeerTransport;
use kudos_core::Block;

/// Polls peers for approval of candidate blocks.
#[derive(Clone)]
pub struct ConsensusGate {
    transport: Arc<dyn PeerTransport>,
    /// Upper bound on each peer's answer.
    peer_timeout: Duration,
}

impl ConsensusGate {
    pub fn new(transport: Arc<dyn PeerTransport>, peer_timeout: Duration) -> Self {
        Self {
            transport,
            peer_timeout,
        }
    }

    /// Approvals needed to commit with `peer_count` known peers.
    ///
    /// Integer half: with an even peer count exactly half suffices, and an
    /// empty peer set needs none.
    pub fn required_approvals(peer_count: usize) -> usize {
        peer_count / 2
    }

    /// Whether `approvals` meets the threshold for `peer_count` peers.
    pub fn is_majority(approvals: usize, peer_count: usize) -> bool {
        approvals >= Self::required_approvals(peer_count)
    }

    /// Ask every peer to review `block` and count explicit approvals.
    ///
    /// Requests go out concurrently. A peer that errors, declines, or does not
    /// answer within the timeout simply does not count. No retries.
    pub async fn solicit_approvals(&self, block: &Block, peers: &[String]) -> usize {
        if peers.is_empty() {
            return 0;
        }

        tracing::debug!(
            "Soliciting approvals for block {} from {} peers",
            block.index,
            peers.len()
        );

        let votes = peers.iter().map(|peer| async move {
            let request = self.transport.request_approval(peer, block);
            match tokio::time::timeout(self.peer_timeout, request).await {
                Ok(Ok(approved)) => approved,
                Ok(Err(e)) => {
                    tracing::debug!("No vote from {}: {}", peer, e);
                    false
                }
                Err(_) => {
                    tracing::warn!("Peer {} timed out after {:?}", peer, self.peer_timeout);
                    false
                }
            }
        });

        let approvals = futures::future::join_all(votes)
            .await
            .into_iter()
            .filter(|approved| *approved)
            .count();

        tracing::info!(
            "Block {}: {}/{} peer approvals (need {})",
            block.index,
            approvals,
            peers.len(),
            Self::required_approvals(peers.len())
        );
        approvals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kudos_p2p::mock::{MockPeer, MockTransport};

    fn block() -> Block {
        Block {
            index: 1,
            timestamp: 1.0,
            transactions: vec![],
            previous_hash: "0".to_string(),
        }
    }

    fn peers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_threshold_is_integer_half() {
        assert_eq!(ConsensusGate::required_approvals(0), 0);
        assert_eq!(ConsensusGate::required_approvals(1), 0);
        assert_eq!(ConsensusGate::required_approvals(2), 1);
        assert_eq!(ConsensusGate::required_approvals(3), 1);
        assert_eq!(ConsensusGate::required_approvals(4), 2);
        assert_eq!(ConsensusGate::required_approvals(5), 2);

        // Exactly half is enough with an even peer count.
        assert!(ConsensusGate::is_majority(2, 4));
        assert!(!ConsensusGate::is_majority(1, 4));
        assert!(ConsensusGate::is_majority(0, 0));
    }

    #[tokio::test]
    async fn test_empty_peer_set_passes() {
        let transport = Arc::new(MockTransport::new());
        let gate = ConsensusGate::new(transport.clone(), Duration::from_secs(1));
        let approvals = gate.solicit_approvals(&block(), &[]).await;
        assert_eq!(approvals, 0);
        assert!(ConsensusGate::is_majority(approvals, 0));
        assert!(transport.approval_requests().is_empty());
    }

    #[tokio::test]
    async fn test_counts_only_explicit_approvals() {
        let transport = Arc::new(
            MockTransport::new()
                .with_peer("yes-1", MockPeer::approving())
                .with_peer("yes-2", MockPeer::approving())
                .with_peer("no", MockPeer::rejecting())
                .with_peer("down", MockPeer::unreachable()),
        );
        let gate = ConsensusGate::new(transport.clone(), Duration::from_secs(1));
        let all = peers(&["yes-1", "yes-2", "no", "down", "unknown"]);

        let approvals = gate.solicit_approvals(&block(), &all).await;
        assert_eq!(approvals, 2);
        assert!(ConsensusGate::is_majority(approvals, all.len()));
        assert_eq!(transport.approval_requests().len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_peer_times_out() {
        let transport = Arc::new(
            MockTransport::new()
                .with_peer("fast", MockPeer::approving())
                .with_peer(
                    "slow",
                    MockPeer::approving().with_delay(Duration::from_secs(30)),
                ),
        );
        let gate = ConsensusGate::new(transport, Duration::from_secs(2));

        let approvals = gate
            .solicit_approvals(&block(), &peers(&["fast", "slow"]))
            .await;
        assert_eq!(approvals, 1);
    }

    #[tokio::test]
    async fn test_minority_rejects() {
        let transport = Arc::new(
            MockTransport::new()
                .with_peer("a", MockPeer::rejecting())
                .with_peer("b", MockPeer::rejecting())
                .with_peer("c", MockPeer::approving())
                .with_peer("d", MockPeer::unreachable()),
        );
        let gate = ConsensusGate::new(transport, Duration::from_secs(1));
        let all = peers(&["a", "b", "c", "d"]);
        let approvals = gate.solicit_approvals(&block(), &all).await;
        assert_eq!(approvals, 1);
        assert!(!ConsensusGate::is_majority(approvals, all.len()));
    }
}
