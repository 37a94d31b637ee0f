// crates/kudos-rpc/src/lib.rs
//
// kudos-rpc: HTTP/JSON API server and handlers for the Kudos Protocol.
//
// Serves the client-facing claim endpoint and the peer-facing endpoints
// (validate, chain, sync_block, nodes/register, nodes/sync) on one axum
// router. Route paths and JSON shapes are the protocol's wire contract.

pub mod error;
pub mod handlers;
pub mod server;

// Re-export the main server types for ergonomic access.
pub use error::ApiError;
pub use server::{build_router, AppState, KudosRpcServer, RpcConfig};
