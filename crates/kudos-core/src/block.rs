// crates/kudos-core/src/block.rs
//
// Ledger data model: Transaction, Block, and Chain.
//
// The JSON shape of these types is the wire format exchanged between nodes
// (`/validate`, `/sync_block`, `/chain`), so field names must not change.

use serde::{Deserialize, Serialize};

/// `previous_hash` of the first block in a chain.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// A claim of `coins` tokens against the likes recorded for post `key`.
///
/// `password` is an opaque claim token supplied by the caller. It is carried
/// on the ledger but never verified and plays no part in claim accounting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Post identifier.
    pub key: String,
    /// Caller-supplied claim token.
    pub password: String,
    /// Number of coins claimed. Always > 0 for transactions we create.
    pub coins: u64,
}

impl Transaction {
    pub fn new(key: impl Into<String>, password: impl Into<String>, coins: u64) -> Self {
        Self {
            key: key.into(),
            password: password.into(),
            coins,
        }
    }
}

/// A block of transactions linked to its predecessor by hash.
///
/// The linkage is computed when the block is built and is never re-checked
/// on append, sync, or reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// 1-based position in the chain.
    pub index: u64,
    /// Creation time in seconds since the Unix epoch.
    pub timestamp: f64,
    /// Transactions carried by this block (locally built blocks carry one).
    pub transactions: Vec<Transaction>,
    /// Hex SHA-256 of the previous block, or `"0"` for the first block.
    pub previous_hash: String,
}

impl Block {
    /// Sum of coins over all transactions in this block.
    pub fn total_coins(&self) -> u64 {
        self.transactions
            .iter()
            .fold(0u64, |acc, tx| acc.saturating_add(tx.coins))
    }

    /// Sum of coins in this block claimed against `key`, under any password.
    pub fn coins_for_key(&self, key: &str) -> u64 {
        self.transactions
            .iter()
            .filter(|tx| tx.key == key)
            .fold(0u64, |acc, tx| acc.saturating_add(tx.coins))
    }
}

/// An ordered sequence of blocks.
pub type Chain = Vec<Block>;

/// Total coins committed against `key` across a whole chain.
pub fn claimed_in_chain(chain: &[Block], key: &str) -> u64 {
    chain
        .iter()
        .fold(0u64, |acc, block| acc.saturating_add(block.coins_for_key(key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_with(txs: Vec<Transaction>) -> Block {
        Block {
            index: 1,
            timestamp: 1_700_000_000.25,
            transactions: txs,
            previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
        }
    }

    #[test]
    fn test_total_coins() {
        let block = block_with(vec![
            Transaction::new("a", "pw", 2),
            Transaction::new("b", "pw", 3),
        ]);
        assert_eq!(block.total_coins(), 5);
    }

    #[test]
    fn test_claimed_ignores_password() {
        let chain = vec![
            block_with(vec![Transaction::new("post", "alice", 2)]),
            block_with(vec![Transaction::new("post", "bob", 1)]),
            block_with(vec![Transaction::new("other", "alice", 7)]),
        ];
        assert_eq!(claimed_in_chain(&chain, "post"), 3);
        assert_eq!(claimed_in_chain(&chain, "other"), 7);
        assert_eq!(claimed_in_chain(&chain, "missing"), 0);
    }

    #[test]
    fn test_wire_shape() {
        let block = block_with(vec![Transaction::new("k", "p", 1)]);
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["index"], 1);
        assert_eq!(value["previous_hash"], "0");
        assert_eq!(value["transactions"][0]["key"], "k");
        assert_eq!(value["transactions"][0]["password"], "p");
        assert_eq!(value["transactions"][0]["coins"], 1);
        assert!(value["timestamp"].is_f64());
    }
}
