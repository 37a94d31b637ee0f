// crates/kudos-core/src/crypto.rs

use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::block::Block;
use crate::error::KudosError;

/// Serialize a value to compact JSON with object keys sorted recursively.
///
/// Sorting is done explicitly rather than relying on serde_json's default
/// map type, so the output stays stable even if some dependency enables
/// `preserve_order`.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, KudosError> {
    let value = serde_json::to_value(value)?;
    Ok(serde_json::to_string(&sort_keys(value))?)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (k, v) in entries {
                sorted.insert(k, sort_keys(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Compute SHA-256 hash of the given bytes.
///
/// Returns a 32-byte hash.
pub fn hash_bytes(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash a block: hex-encoded SHA-256 over its canonical JSON form.
///
/// This digest is embedded as `previous_hash` in the next block, so it must
/// be reproducible bit-for-bit on every node given the same block content.
pub fn hash_block(block: &Block) -> Result<String, KudosError> {
    let canonical = canonical_json(block)?;
    Ok(hex::encode(hash_bytes(canonical.as_bytes())))
}
