// crates/kudos-p2p/src/lib.rs
//
// kudos-p2p: HTTP networking layer for the Kudos Protocol.
//
// Provides the known-peer registry, an HTTP implementation of the
// PeerTransport trait, fire-and-forget block gossip, and the bootstrap
// self-announce loop.

pub mod discovery;
pub mod gossip;
pub mod peers;
pub mod transport;

pub use discovery::{discover_once, run_discovery_loop};
pub use gossip::broadcast_block;
pub use peers::PeerRegistry;
pub use transport::{
    peer_url, BlockEnvelope, ChainEnvelope, HttpPeerTransport, RegisterNodesRequest,
    DEFAULT_PEER_TIMEOUT_SECS,
};

#[cfg(any(test, feature = "test-util"))]
pub mod mock;
