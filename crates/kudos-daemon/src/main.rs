// crates/kudos-daemon/src/main.rs
//
// Binary entrypoint for the Kudos Protocol daemon.
//
// Parses CLI arguments, loads configuration, initializes tracing, wires the
// ledger, post store, peer registry, and transport into the HTTP server, and
// spawns the discovery and reconciliation loops.

mod config;
mod sync_loop;

use std::sync::Arc;

use clap::Parser;
use config::DaemonConfig;

use kudos_core::traits::{ClaimsLedger, PeerTransport, PostStore};
use kudos_p2p::{run_discovery_loop, HttpPeerTransport, PeerRegistry};
use kudos_rpc::{AppState, KudosRpcServer, RpcConfig};
use kudos_store::{InMemoryClaimsLedger, InMemoryPostStore, LedgerStore};

/// Kudos Protocol daemon: turns post likes into KDS coins on a shared ledger.
#[derive(Parser, Debug)]
#[command(name = "kudos-daemon", version = "0.1.0", about = "Kudos Protocol node daemon")]
struct Args {
    /// Port for the HTTP server.
    port: u16,

    /// Path to the TOML configuration file.
    #[arg(long, default_value = "~/.kudos/config.toml")]
    config: String,

    /// Host to bind to; overrides `rpc_host` from the config file.
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration before tracing is up so its log level can apply;
    // the outcome is reported once the subscriber exists.
    let loaded = DaemonConfig::load(&args.config);
    let log_level = loaded
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let mut daemon_config = match loaded {
        Ok(cfg) => {
            tracing::info!("Loaded configuration from {}", args.config);
            cfg
        }
        Err(e) => {
            tracing::warn!("Could not load config: {}. Using defaults.", e);
            DaemonConfig::default()
        }
    };

    // CLI --host overrides the config file value.
    if let Some(host) = args.host {
        daemon_config.rpc_host = host;
    }
    let self_address = daemon_config.self_address_for(args.port);

    tracing::info!("Kudos Protocol Daemon v0.1.0");
    tracing::info!("HTTP endpoint: {}:{}", daemon_config.rpc_host, args.port);
    tracing::info!("Announcing as: {}", self_address);
    tracing::info!("Total circulation: {}", daemon_config.total_circulation);

    // ---------------------------------------------------------------
    // Seed data: post likes and, optionally, an external claims ledger.
    // ---------------------------------------------------------------
    let posts: Arc<dyn PostStore> = match &daemon_config.posts_file {
        Some(path) => {
            let path = config::expand_tilde(path);
            Arc::new(InMemoryPostStore::load_json(&path)?)
        }
        None => {
            tracing::warn!("No posts_file configured; every claim will report Post not found");
            Arc::new(InMemoryPostStore::new())
        }
    };

    let review_claims: Option<Arc<dyn ClaimsLedger>> = match &daemon_config.claims_file {
        Some(path) => {
            let path = config::expand_tilde(path);
            let ledger = InMemoryClaimsLedger::load_json(&path)?;
            tracing::info!("Reviewing peer blocks against claims in {}", path);
            Some(Arc::new(ledger))
        }
        None => None,
    };

    // ---------------------------------------------------------------
    // Node state: ledger, peers, transport.
    // ---------------------------------------------------------------
    let ledger = Arc::new(LedgerStore::new());
    let registry = Arc::new(PeerRegistry::new(
        self_address,
        daemon_config.bootstrap_peers.clone(),
    ));
    let peer_timeout = daemon_config.peer_timeout();
    let transport: Arc<dyn PeerTransport> = Arc::new(HttpPeerTransport::new(peer_timeout));

    let state = AppState::new(
        posts,
        review_claims,
        ledger.clone(),
        registry.clone(),
        transport.clone(),
        daemon_config.total_circulation,
        peer_timeout,
    );

    // ---------------------------------------------------------------
    // Background loops.
    // ---------------------------------------------------------------
    if !daemon_config.bootstrap_peers.is_empty() {
        tokio::spawn(run_discovery_loop(
            registry.clone(),
            transport,
            daemon_config.discovery_interval(),
        ));
    }

    tokio::spawn(sync_loop::run_sync_loop(
        state.reconciler.clone(),
        ledger,
        registry,
        daemon_config.sync_interval(),
    ));

    // ---------------------------------------------------------------
    // HTTP server (runs until the process exits).
    // ---------------------------------------------------------------
    let rpc_config = RpcConfig {
        host: daemon_config.rpc_host.clone(),
        port: args.port,
    };
    let server = KudosRpcServer::new(rpc_config, state);
    server.start().await?;

    Ok(())
}
