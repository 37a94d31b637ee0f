// crates/kudos-rpc/src/handlers/claim.rs
//
// Claim handler: GET /claim?key=..&password=..&coins=..

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use kudos_consensus::ClaimRequest;
use kudos_core::Block;

use crate::error::ApiError;
use crate::server::AppState;

/// Raw query parameters. Kept as strings so that missing and malformed
/// values produce the protocol's own error messages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClaimParams {
    pub key: Option<String>,
    pub password: Option<String>,
    pub coins: Option<String>,
}

/// Successful claim response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimResponse {
    pub message: String,
    pub block: Block,
}

/// Parse query parameters into a claim request.
pub fn parse_claim_params(params: ClaimParams) -> Result<ClaimRequest, ApiError> {
    let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());

    let (key, password, coins) = match (
        non_empty(params.key),
        non_empty(params.password),
        non_empty(params.coins),
    ) {
        (Some(k), Some(p), Some(c)) => (k, p, c),
        _ => {
            return Err(ApiError::bad_request(
                "Invalid request. Provide key, password, and coins.",
            ))
        }
    };

    let coins = coins
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|c| *c > 0)
        .ok_or_else(|| ApiError::bad_request("Invalid coins value. Must be a positive integer."))?;

    Ok(ClaimRequest {
        key,
        password,
        coins,
    })
}

/// Handle a claim request.
///
/// Rejects malformed input before touching the ledger or any peer, then runs
/// the serialized evaluate -> gate -> commit pipeline.
pub async fn claim(
    State(state): State<AppState>,
    Query(params): Query<ClaimParams>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let request = parse_claim_params(params)?;
    let block = state.coordinator.claim(&request).await?;

    tracing::info!(
        "Claimed {} coins for post {} in block {}",
        request.coins,
        request.key,
        block.index
    );

    Ok(Json(ClaimResponse {
        message: format!("{} coins claimed successfully!", request.coins),
        block,
    }))
}
