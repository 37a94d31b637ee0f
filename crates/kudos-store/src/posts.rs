// crates/kudos-store/src/posts.rs
//
// Read-only collaborator stores: post likes and the external claims ledger.
//
// Both are seeded from JSON files of records at startup, e.g.
//   posts.json:  [{"key": "post-1", "likes": 35}]
//   claims.json: [{"key": "post-1", "coins": 2}]
// The node never writes to them; `set_likes` exists for operators and tests
// to refresh counts in place.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use kudos_core::traits::{ClaimsLedger, PostStore};
use kudos_core::KudosError;

/// A post and its like count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub key: String,
    #[serde(default)]
    pub likes: u64,
}

/// Coins previously claimed against a post, as recorded outside the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub key: String,
    #[serde(default)]
    pub coins: u64,
}

/// In-memory post store keyed by post key.
#[derive(Debug, Default)]
pub struct InMemoryPostStore {
    likes: RwLock<HashMap<String, u64>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records. Later records for the same key win.
    pub fn from_records(records: impl IntoIterator<Item = PostRecord>) -> Self {
        let likes = records.into_iter().map(|r| (r.key, r.likes)).collect();
        Self {
            likes: RwLock::new(likes),
        }
    }

    /// Load records from a JSON array file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, KudosError> {
        let records: Vec<PostRecord> = read_records(path.as_ref())?;
        tracing::info!(
            "Loaded {} posts from {}",
            records.len(),
            path.as_ref().display()
        );
        Ok(Self::from_records(records))
    }

    /// Set (or insert) the like count for a post.
    pub async fn set_likes(&self, key: impl Into<String>, likes: u64) {
        self.likes.write().await.insert(key.into(), likes);
    }

    pub async fn len(&self) -> usize {
        self.likes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.likes.read().await.is_empty()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn likes(&self, key: &str) -> Result<Option<u64>, KudosError> {
        Ok(self.likes.read().await.get(key).copied())
    }
}

/// In-memory external claims ledger. Multiple records for a key are summed.
#[derive(Debug, Default)]
pub struct InMemoryClaimsLedger {
    coins: RwLock<HashMap<String, u64>>,
}

impl InMemoryClaimsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = ClaimRecord>) -> Self {
        let mut coins: HashMap<String, u64> = HashMap::new();
        for record in records {
            let entry = coins.entry(record.key).or_default();
            *entry = entry.saturating_add(record.coins);
        }
        Self {
            coins: RwLock::new(coins),
        }
    }

    /// Load records from a JSON array file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, KudosError> {
        let records: Vec<ClaimRecord> = read_records(path.as_ref())?;
        tracing::info!(
            "Loaded {} claim records from {}",
            records.len(),
            path.as_ref().display()
        );
        Ok(Self::from_records(records))
    }
}

#[async_trait]
impl ClaimsLedger for InMemoryClaimsLedger {
    async fn claimed_coins(&self, key: &str) -> Result<u64, KudosError> {
        Ok(self.coins.read().await.get(key).copied().unwrap_or(0))
    }
}

fn read_records<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, KudosError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        KudosError::Storage(format!("Failed to read {}: {}", path.display(), e))
    })?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_post_store_lookup() {
        let store = InMemoryPostStore::from_records(vec![
            PostRecord {
                key: "a".to_string(),
                likes: 35,
            },
            PostRecord {
                key: "b".to_string(),
                likes: 0,
            },
        ]);
        assert_eq!(store.likes("a").await.unwrap(), Some(35));
        assert_eq!(store.likes("b").await.unwrap(), Some(0));
        assert_eq!(store.likes("c").await.unwrap(), None);

        store.set_likes("c", 12).await;
        assert_eq!(store.likes("c").await.unwrap(), Some(12));
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn test_claims_ledger_sums_records() {
        let ledger = InMemoryClaimsLedger::from_records(vec![
            ClaimRecord {
                key: "a".to_string(),
                coins: 2,
            },
            ClaimRecord {
                key: "a".to_string(),
                coins: 1,
            },
        ]);
        assert_eq!(ledger.claimed_coins("a").await.unwrap(), 3);
        assert_eq!(ledger.claimed_coins("b").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_load_json_files() {
        let mut posts = tempfile::NamedTempFile::new().unwrap();
        write!(posts, r#"[{{"key": "p1", "likes": 35}}, {{"key": "p2"}}]"#).unwrap();
        let store = InMemoryPostStore::load_json(posts.path()).unwrap();
        assert_eq!(store.likes("p1").await.unwrap(), Some(35));
        assert_eq!(store.likes("p2").await.unwrap(), Some(0));

        let mut claims = tempfile::NamedTempFile::new().unwrap();
        write!(claims, r#"[{{"key": "p1", "coins": 2}}]"#).unwrap();
        let ledger = InMemoryClaimsLedger::load_json(claims.path()).unwrap();
        assert_eq!(ledger.claimed_coins("p1").await.unwrap(), 2);
    }

    #[test]
    fn test_load_json_errors() {
        let err = InMemoryPostStore::load_json("/nonexistent/kudos/posts.json").unwrap_err();
        assert!(matches!(err, KudosError::Storage(_)));

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        write!(bad, "not json").unwrap();
        let err = InMemoryPostStore::load_json(bad.path()).unwrap_err();
        assert!(matches!(err, KudosError::Serialization(_)));
    }
}
