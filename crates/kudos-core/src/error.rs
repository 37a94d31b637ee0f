// crates/kudos-core/src/error.rs

use thiserror::Error;

/// Protocol-wide error types for the Kudos Protocol.
#[derive(Debug, Error)]
pub enum KudosError {
    /// Malformed or missing request parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource not found (unknown post key).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The post has fewer than one coin's worth of unclaimed likes.
    #[error("Not enough new likes to claim coins")]
    InsufficientLikes,

    /// The request asks for more coins than the post currently allows.
    #[error("You can claim a maximum of {max} coins right now.")]
    ExceedsClaimable { max: u64 },

    /// Committing the claim would push circulating supply past the cap.
    #[error("Coin limit exceeded: supply {supply} + {requested} > cap {cap}")]
    SupplyExhausted { supply: u64, requested: u64, cap: u64 },

    /// Fewer peers approved the candidate block than the majority threshold.
    #[error("Not enough peer approvals: {approvals} of {required} required")]
    ConsensusRejected { approvals: usize, required: usize },

    /// Peer communication error (timeout, refused connection, bad status).
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Local storage or seed-data error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for KudosError {
    fn from(e: serde_json::Error) -> Self {
        KudosError::Serialization(e.to_string())
    }
}
