// crates/kudos-store/src/ledger.rs
//
// LedgerStore: the node's in-memory, append-only chain and the circulating
// supply derived from locally committed claims.
//
// Two locks:
//   - `state` (RwLock) guards the chain and supply for short reads/writes.
//   - `writer` (Mutex) serializes whole mutation sequences. Anything that
//     reads the chain, decides, and then mutates it (claim commit, synced
//     append, reconciliation replace) holds the writer guard throughout.
//     Readers (`/chain`, peer review) never touch it.

use async_trait::async_trait;
use tokio::sync::{Mutex, MutexGuard, RwLock};

use kudos_core::block::claimed_in_chain;
use kudos_core::crypto::hash_block;
use kudos_core::traits::ClaimsLedger;
use kudos_core::{Block, Chain, KudosError, Transaction, GENESIS_PREVIOUS_HASH};
use kudos_economics::Kds;

#[derive(Debug, Default)]
struct LedgerState {
    chain: Chain,
    supply: Kds,
}

/// In-memory ledger shared by request handlers and background tasks.
#[derive(Debug, Default)]
pub struct LedgerStore {
    state: RwLock<LedgerState>,
    writer: Mutex<()>,
}

impl LedgerStore {
    /// Create an empty ledger with zero supply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the writer lock that serializes chain mutation sequences.
    pub async fn writer(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().await
    }

    /// Hash of the last block, or `"0"` for an empty chain.
    pub async fn tail_hash(&self) -> Result<String, KudosError> {
        let state = self.state.read().await;
        tail_hash_of(&state.chain)
    }

    /// Build the next block for `transactions` without appending it.
    ///
    /// Assigns the next 1-based index, the current time, and links to the
    /// current tail by hash.
    pub async fn build_candidate(&self, transactions: Vec<Transaction>) -> Result<Block, KudosError> {
        let state = self.state.read().await;
        Ok(Block {
            index: state.chain.len() as u64 + 1,
            timestamp: now_seconds(),
            transactions,
            previous_hash: tail_hash_of(&state.chain)?,
        })
    }

    /// Append an approved block and add its coins to the circulating supply.
    ///
    /// No re-validation happens here; callers evaluate the claim and consult
    /// peers under the writer lock before committing.
    pub async fn commit(&self, block: Block) {
        let mut state = self.state.write().await;
        let minted = block.total_coins();
        state.supply = state.supply + minted;
        tracing::info!(
            index = block.index,
            minted,
            supply = %state.supply,
            "Committed block"
        );
        state.chain.push(block);
    }

    /// Append a block received from a peer broadcast.
    ///
    /// Accepted without validation. Supply only tracks locally committed
    /// claims, so it is left unchanged.
    pub async fn append_synced(&self, block: Block) {
        let mut state = self.state.write().await;
        tracing::debug!(index = block.index, "Appending synced block");
        state.chain.push(block);
    }

    /// Overwrite the local chain (used by reconciliation). Supply is not
    /// recomputed from the new chain.
    pub async fn replace(&self, chain: Chain) {
        let mut state = self.state.write().await;
        tracing::info!(
            old_len = state.chain.len(),
            new_len = chain.len(),
            "Replacing local chain"
        );
        state.chain = chain;
    }

    /// Point-in-time copy of the chain.
    pub async fn snapshot(&self) -> Chain {
        self.state.read().await.chain.clone()
    }

    /// Number of blocks in the chain.
    pub async fn len(&self) -> usize {
        self.state.read().await.chain.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.chain.is_empty()
    }

    /// Circulating supply from locally committed claims.
    pub async fn supply(&self) -> Kds {
        self.state.read().await.supply
    }
}

#[async_trait]
impl ClaimsLedger for LedgerStore {
    async fn claimed_coins(&self, key: &str) -> Result<u64, KudosError> {
        let state = self.state.read().await;
        Ok(claimed_in_chain(&state.chain, key))
    }
}

fn tail_hash_of(chain: &[Block]) -> Result<String, KudosError> {
    match chain.last() {
        Some(block) => hash_block(block),
        None => Ok(GENESIS_PREVIOUS_HASH.to_string()),
    }
}

fn now_seconds() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
