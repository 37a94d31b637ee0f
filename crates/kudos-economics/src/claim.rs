// crates/kudos-economics/src/claim.rs
//
// Claim eligibility: how many coins a post's likes still back.
//
// Every node must reach the same answer for the same inputs, because a
// claiming node and the peers reviewing its candidate block each run this
// computation independently.

use std::sync::Arc;

use kudos_core::traits::{ClaimsLedger, PostStore};
use kudos_core::{KudosError, Transaction};

use crate::token::{Kds, LIKES_PER_COIN};

/// Maximum coins still claimable for a post.
///
/// `available = likes - already_claimed * 10`, then `floor(available / 10)`,
/// clamped at zero when earlier claims have consumed every like.
pub fn max_claimable(likes: u64, already_claimed: u64) -> u64 {
    let consumed = already_claimed.saturating_mul(LIKES_PER_COIN);
    likes.saturating_sub(consumed) / LIKES_PER_COIN
}

/// Evaluates claim requests against a post store and a source of prior claims.
///
/// The claims source decides whose view of "already claimed" is used: the
/// node's own ledger when claiming, or the configured external claims ledger
/// when reviewing a peer's candidate block.
#[derive(Clone)]
pub struct ClaimEvaluator {
    posts: Arc<dyn PostStore>,
    claims: Arc<dyn ClaimsLedger>,
    total_circulation: u64,
}

impl ClaimEvaluator {
    pub fn new(
        posts: Arc<dyn PostStore>,
        claims: Arc<dyn ClaimsLedger>,
        total_circulation: u64,
    ) -> Self {
        Self {
            posts,
            claims,
            total_circulation,
        }
    }

    /// The supply cap this evaluator enforces.
    pub fn total_circulation(&self) -> u64 {
        self.total_circulation
    }

    /// Maximum coins still claimable for `key`.
    ///
    /// Prior claims are matched on `key` alone: coins claimed under any
    /// password count against the same post.
    pub async fn max_claimable_for(&self, key: &str) -> Result<u64, KudosError> {
        let likes = self
            .posts
            .likes(key)
            .await?
            .ok_or_else(|| KudosError::NotFound(format!("post {}", key)))?;
        let already_claimed = self.claims.claimed_coins(key).await?;
        Ok(max_claimable(likes, already_claimed))
    }

    /// Validate a claim request and produce the transaction to commit.
    ///
    /// Checks run in a fixed order: coin count, post existence, remaining
    /// likes, per-post ceiling, then the global supply cap.
    pub async fn evaluate_request(
        &self,
        key: &str,
        password: &str,
        coins: i64,
        current_supply: Kds,
    ) -> Result<Transaction, KudosError> {
        if key.is_empty() || password.is_empty() {
            return Err(KudosError::InvalidInput(
                "key and password must be non-empty".to_string(),
            ));
        }
        if coins <= 0 {
            return Err(KudosError::InvalidInput(format!(
                "coins must be a positive integer, got {}",
                coins
            )));
        }
        let requested = coins as u64;

        let max = self.max_claimable_for(key).await?;
        if max < 1 {
            return Err(KudosError::InsufficientLikes);
        }
        if requested > max {
            return Err(KudosError::ExceedsClaimable { max });
        }
        if !current_supply.can_mint(requested, self.total_circulation) {
            return Err(KudosError::SupplyExhausted {
                supply: current_supply.coins,
                requested,
                cap: self.total_circulation,
            });
        }

        tracing::debug!(key, requested, max, "Claim request accepted by evaluator");
        Ok(Transaction::new(key, password, requested))
    }

    /// Peer-side review of a proposed transaction.
    ///
    /// Approves iff the post exists and the coins do not exceed the locally
    /// computed ceiling. Supply, hash linkage, and signatures are not checked.
    pub async fn review_transaction(&self, tx: &Transaction) -> Result<(), KudosError> {
        let max = self.max_claimable_for(&tx.key).await?;
        if tx.coins > max {
            return Err(KudosError::ExceedsClaimable { max });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct FixedPosts(HashMap<String, u64>);

    #[async_trait]
    impl PostStore for FixedPosts {
        async fn likes(&self, key: &str) -> Result<Option<u64>, KudosError> {
            Ok(self.0.get(key).copied())
        }
    }

    struct FixedClaims(HashMap<String, u64>);

    #[async_trait]
    impl ClaimsLedger for FixedClaims {
        async fn claimed_coins(&self, key: &str) -> Result<u64, KudosError> {
            Ok(self.0.get(key).copied().unwrap_or(0))
        }
    }

    fn evaluator(likes: u64, claimed: u64, cap: u64) -> ClaimEvaluator {
        let posts = FixedPosts(HashMap::from([("post".to_string(), likes)]));
        let claims = FixedClaims(HashMap::from([("post".to_string(), claimed)]));
        ClaimEvaluator::new(Arc::new(posts), Arc::new(claims), cap)
    }

    #[test]
    fn test_max_claimable_fresh_post() {
        assert_eq!(max_claimable(35, 0), 3);
    }

    #[test]
    fn test_max_claimable_partially_claimed() {
        // 20 likes consumed, 15 remain.
        assert_eq!(max_claimable(35, 2), 1);
    }

    #[test]
    fn test_max_claimable_clamps_at_zero() {
        assert_eq!(max_claimable(5, 1), 0);
        assert_eq!(max_claimable(0, 0), 0);
        assert_eq!(max_claimable(10, u64::MAX), 0);
    }

    #[test]
    fn test_max_claimable_decreases_by_claimed_amount() {
        let likes = 87;
        for claimed in 0..=8 {
            assert_eq!(max_claimable(likes, claimed), 8 - claimed);
        }
    }

    #[tokio::test]
    async fn test_max_claimable_for_unknown_post() {
        let ev = evaluator(35, 0, 100);
        let err = ev.max_claimable_for("nope").await.unwrap_err();
        assert!(matches!(err, KudosError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_evaluate_rejects_non_positive_coins_first() {
        let ev = evaluator(35, 0, 100);
        // Unknown key would be NotFound, but the coin check comes first.
        for coins in [0, -1, -100] {
            let err = ev
                .evaluate_request("nope", "pw", coins, Kds::zero())
                .await
                .unwrap_err();
            assert!(matches!(err, KudosError::InvalidInput(_)));
        }
    }

    #[tokio::test]
    async fn test_evaluate_rejects_empty_key_or_password() {
        let ev = evaluator(35, 0, 100);
        let err = ev.evaluate_request("", "pw", 1, Kds::zero()).await.unwrap_err();
        assert!(matches!(err, KudosError::InvalidInput(_)));
        let err = ev.evaluate_request("post", "", 1, Kds::zero()).await.unwrap_err();
        assert!(matches!(err, KudosError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_evaluate_post_not_found() {
        let ev = evaluator(35, 0, 100);
        let err = ev
            .evaluate_request("missing", "pw", 1, Kds::zero())
            .await
            .unwrap_err();
        assert!(matches!(err, KudosError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_evaluate_insufficient_likes() {
        let ev = evaluator(9, 0, 100);
        let err = ev
            .evaluate_request("post", "pw", 1, Kds::zero())
            .await
            .unwrap_err();
        assert!(matches!(err, KudosError::InsufficientLikes));
    }

    #[tokio::test]
    async fn test_evaluate_exceeds_claimable_reports_ceiling() {
        let ev = evaluator(35, 0, 100);
        let err = ev
            .evaluate_request("post", "pw", 4, Kds::zero())
            .await
            .unwrap_err();
        match err {
            KudosError::ExceedsClaimable { max } => assert_eq!(max, 3),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_evaluate_supply_exhausted() {
        let ev = evaluator(1_000, 0, 100);
        let err = ev
            .evaluate_request("post", "pw", 5, Kds::new(96))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            KudosError::SupplyExhausted {
                supply: 96,
                requested: 5,
                cap: 100
            }
        ));

        // Exactly reaching the cap is allowed.
        let tx = ev
            .evaluate_request("post", "pw", 4, Kds::new(96))
            .await
            .unwrap();
        assert_eq!(tx.coins, 4);
    }

    #[tokio::test]
    async fn test_evaluate_success_builds_transaction() {
        let ev = evaluator(35, 2, 100);
        let tx = ev
            .evaluate_request("post", "secret", 1, Kds::zero())
            .await
            .unwrap();
        assert_eq!(tx, Transaction::new("post", "secret", 1));
    }

    #[tokio::test]
    async fn test_review_transaction() {
        let ev = evaluator(35, 1, 100);
        assert!(ev
            .review_transaction(&Transaction::new("post", "pw", 2))
            .await
            .is_ok());
        let err = ev
            .review_transaction(&Transaction::new("post", "pw", 3))
            .await
            .unwrap_err();
        assert!(matches!(err, KudosError::ExceedsClaimable { max: 2 }));
        let err = ev
            .review_transaction(&Transaction::new("missing", "pw", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, KudosError::NotFound(_)));
    }
}
