// crates/kudos-rpc/src/handlers/peer.rs
//
// Peer registration: POST /nodes/register {"nodes": [...]}

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::server::AppState;

/// Response of `/nodes/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    /// Every known peer address after registration.
    pub total_nodes: Vec<String>,
}

fn node_list(body: &[u8]) -> Option<Vec<String>> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let nodes: Vec<String> = value
        .get("nodes")?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();
    if nodes.is_empty() {
        None
    } else {
        Some(nodes)
    }
}

/// Add the given addresses to the peer registry.
pub async fn register_nodes(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RegisterResponse>, ApiError> {
    let nodes = node_list(&body).ok_or_else(|| ApiError::bad_request("No nodes provided"))?;

    let added = state.registry.register(nodes).await;
    let total_nodes = state.registry.members().await;
    if added > 0 {
        tracing::info!("Registered {} new peer(s), {} known", added, total_nodes.len());
    }

    Ok(Json(RegisterResponse {
        message: "Nodes registered!".to_string(),
        total_nodes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_list() {
        assert_eq!(
            node_list(br#"{"nodes":["a:1","b:2"]}"#),
            Some(vec!["a:1".to_string(), "b:2".to_string()])
        );
        assert_eq!(node_list(br#"{"nodes":[]}"#), None);
        assert_eq!(node_list(br#"{}"#), None);
        assert_eq!(node_list(b"garbage"), None);
    }
}
