// crates/kudos-rpc/src/server.rs
//
// HTTP server setup: RpcConfig, AppState, the axum router, and KudosRpcServer.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use kudos_consensus::ClaimCoordinator;
use kudos_core::traits::{ClaimsLedger, PeerTransport, PostStore};
use kudos_economics::ClaimEvaluator;
use kudos_p2p::PeerRegistry;
use kudos_store::LedgerStore;
use kudos_sync::ChainReconciler;

use crate::handlers;

// ---------------------------------------------------------------------------
// RpcConfig
// ---------------------------------------------------------------------------

/// Configuration for the HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Host to bind to (e.g., "127.0.0.1" or "0.0.0.0").
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Serialized claim pipeline (evaluate, gate, commit, broadcast).
    pub coordinator: Arc<ClaimCoordinator>,
    /// Evaluator used to review peers' candidate blocks.
    pub reviewer: Arc<ClaimEvaluator>,
    /// The local chain and supply.
    pub ledger: Arc<LedgerStore>,
    /// Known peers.
    pub registry: Arc<PeerRegistry>,
    /// Longest-chain reconciliation against peers.
    pub reconciler: ChainReconciler,
}

impl AppState {
    /// Wire up a node's state from its collaborators.
    ///
    /// `review_claims` is the already-claimed source used when reviewing a
    /// peer's block; `None` falls back to the local ledger.
    pub fn new(
        posts: Arc<dyn PostStore>,
        review_claims: Option<Arc<dyn ClaimsLedger>>,
        ledger: Arc<LedgerStore>,
        registry: Arc<PeerRegistry>,
        transport: Arc<dyn PeerTransport>,
        total_circulation: u64,
        peer_timeout: Duration,
    ) -> Self {
        let review_claims =
            review_claims.unwrap_or_else(|| ledger.clone() as Arc<dyn ClaimsLedger>);
        let reviewer = ClaimEvaluator::new(posts.clone(), review_claims, total_circulation);
        let coordinator = ClaimCoordinator::new(
            posts,
            ledger.clone(),
            registry.clone(),
            transport.clone(),
            total_circulation,
            peer_timeout,
        );

        Self {
            coordinator: Arc::new(coordinator),
            reviewer: Arc::new(reviewer),
            ledger,
            registry,
            reconciler: ChainReconciler::new(transport),
        }
    }
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Client-facing
        .route("/claim", get(handlers::claim::claim))
        // Peer-facing
        .route("/validate", post(handlers::validation::validate_block))
        .route("/chain", get(handlers::chain::get_chain))
        .route("/sync_block", post(handlers::chain::sync_block))
        .route("/nodes/register", post(handlers::peer::register_nodes))
        .route("/nodes/sync", get(handlers::chain::sync_chain))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// KudosRpcServer
// ---------------------------------------------------------------------------

/// The HTTP server for a Kudos node.
#[derive(Clone)]
pub struct KudosRpcServer {
    config: RpcConfig,
    state: AppState,
}

impl std::fmt::Debug for KudosRpcServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KudosRpcServer")
            .field("config", &self.config)
            .finish()
    }
}

impl KudosRpcServer {
    pub fn new(config: RpcConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Bind to the configured address and serve until the process exits.
    pub async fn start(&self) -> std::io::Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already-bound listener.
    pub async fn serve(&self, listener: TcpListener) -> std::io::Result<()> {
        let local: SocketAddr = listener.local_addr()?;
        tracing::info!("Kudos HTTP server listening on {}", local);
        axum::serve(listener, build_router(self.state.clone())).await
    }
}
