// crates/kudos-rpc/src/handlers/chain.rs
//
// Chain handlers: GET /chain, POST /sync_block, GET /nodes/sync

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use kudos_core::Chain;
use kudos_p2p::{BlockEnvelope, ChainEnvelope};

use crate::error::ApiError;
use crate::server::AppState;

/// Response of `/nodes/sync`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResponse {
    pub message: String,
    pub chain: Chain,
}

/// Return the full local chain.
pub async fn get_chain(State(state): State<AppState>) -> Json<ChainEnvelope> {
    Json(ChainEnvelope {
        chain: state.ledger.snapshot().await,
    })
}

/// Accept a block broadcast by a peer.
///
/// Appended without validation when it decodes. A JSON body whose block
/// cannot be decoded is logged and acknowledged anyway.
pub async fn sync_block(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let value: Value = serde_json::from_slice(&body)
        .map_err(|_| ApiError::bad_request("Invalid block format"))?;

    match serde_json::from_value::<BlockEnvelope>(value) {
        Ok(BlockEnvelope { block }) => {
            let _guard = state.ledger.writer().await;
            tracing::info!("Synced block {} from peer", block.index);
            state.ledger.append_synced(block).await;
        }
        Err(e) => {
            tracing::warn!("Ignoring undecodable synced block: {}", e);
        }
    }

    Ok(Json(json!({ "message": "Block synced" })))
}

/// Run a reconciliation pass against every known peer.
pub async fn sync_chain(State(state): State<AppState>) -> Json<SyncResponse> {
    let peers = state.registry.members().await;
    let chain = state.reconciler.sync_ledger(&state.ledger, &peers).await;
    Json(SyncResponse {
        message: "Blockchain synchronized!".to_string(),
        chain,
    })
}
