// crates/kudos-rpc/src/handlers/validation.rs
//
// Peer review of a candidate block: POST /validate {"block": {...}}
//
// The body is inspected as loose JSON rather than decoded straight into a
// Block so that structural problems and bad transaction fields map onto
// distinct error messages.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use kudos_core::{KudosError, Transaction};

use crate::error::ApiError;
use crate::server::AppState;

fn invalid_block() -> ApiError {
    ApiError::bad_request("Invalid block format")
}

fn invalid_transaction() -> ApiError {
    ApiError::bad_request("Invalid transaction data")
}

/// Extract the transactions of a proposed block.
pub fn parse_block_transactions(body: &[u8]) -> Result<Vec<Transaction>, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| invalid_block())?;
    let entries = value
        .get("block")
        .and_then(|block| block.get("transactions"))
        .and_then(Value::as_array)
        .filter(|txs| !txs.is_empty())
        .ok_or_else(invalid_block)?;

    entries.iter().map(parse_transaction).collect()
}

fn parse_transaction(entry: &Value) -> Result<Transaction, ApiError> {
    let field = |name: &str| {
        entry
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    };

    let key = field("key").ok_or_else(invalid_transaction)?;
    let password = field("password").ok_or_else(invalid_transaction)?;
    let coins = entry
        .get("coins")
        .and_then(Value::as_u64)
        .filter(|c| *c >= 1)
        .ok_or_else(invalid_transaction)?;

    Ok(Transaction::new(key, password, coins))
}

/// Approve or reject a peer's candidate block.
///
/// Every transaction is reviewed against this node's view of likes and
/// prior claims. The first failing transaction decides the response.
pub async fn validate_block(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let transactions = parse_block_transactions(&body)?;

    for tx in &transactions {
        match state.reviewer.review_transaction(tx).await {
            Ok(()) => {}
            Err(KudosError::ExceedsClaimable { max }) => {
                tracing::info!(
                    "Rejecting block: {} coins for {} exceeds ceiling of {}",
                    tx.coins,
                    tx.key,
                    max
                );
                return Err(ApiError::bad_request("Claim exceeds available likes"));
            }
            Err(e) => {
                tracing::info!("Rejecting block: {}", e);
                return Err(e.into());
            }
        }
    }

    Ok(Json(json!({ "message": "Block approved" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_of(body: &str) -> String {
        parse_block_transactions(body.as_bytes())
            .unwrap_err()
            .body
            .error
    }

    #[test]
    fn test_parse_well_formed_block() {
        let body = r#"{"block":{"index":1,"timestamp":1.0,"previous_hash":"0",
            "transactions":[{"key":"a","password":"p","coins":2},
                            {"key":"b","password":"q","coins":1}]}}"#;
        let txs = parse_block_transactions(body.as_bytes()).unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0], Transaction::new("a", "p", 2));
        assert_eq!(txs[1].key, "b");
    }

    #[test]
    fn test_structural_errors() {
        for body in [
            "not json",
            "{}",
            r#"{"block":{}}"#,
            r#"{"block":{"transactions":[]}}"#,
            r#"{"block":{"transactions":"x"}}"#,
        ] {
            assert_eq!(error_of(body), "Invalid block format", "body: {}", body);
        }
    }

    #[test]
    fn test_transaction_field_errors() {
        for tx in [
            r#"{"password":"p","coins":1}"#,
            r#"{"key":"","password":"p","coins":1}"#,
            r#"{"key":"a","coins":1}"#,
            r#"{"key":"a","password":"p"}"#,
            r#"{"key":"a","password":"p","coins":0}"#,
            r#"{"key":"a","password":"p","coins":-1}"#,
            r#"{"key":"a","password":"p","coins":"2"}"#,
        ] {
            let body = format!(r#"{{"block":{{"transactions":[{}]}}}}"#, tx);
            assert_eq!(error_of(&body), "Invalid transaction data", "tx: {}", tx);
        }
    }
}
