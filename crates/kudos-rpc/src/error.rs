// crates/kudos-rpc/src/error.rs
//
// Mapping from protocol errors to HTTP responses.
//
// Every error body has the shape `{"error": "<message>"}`. Claim ceiling
// errors also carry `max_claimable` so callers can retry with a valid amount.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use kudos_core::KudosError;

/// Error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_claimable: Option<u64>,
}

/// An HTTP error: status code plus JSON body.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: message.into(),
                max_claimable: None,
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn with_ceiling(mut self, max: u64) -> Self {
        self.body.max_claimable = Some(max);
        self
    }
}

impl From<KudosError> for ApiError {
    fn from(e: KudosError) -> Self {
        match e {
            KudosError::InvalidInput(msg) => ApiError::bad_request(msg),
            KudosError::NotFound(_) => ApiError::bad_request("Post not found"),
            KudosError::InsufficientLikes => {
                ApiError::bad_request("Not enough new likes to claim coins").with_ceiling(0)
            }
            KudosError::ExceedsClaimable { max } => ApiError::bad_request(format!(
                "You can claim a maximum of {} coins right now.",
                max
            ))
            .with_ceiling(max),
            KudosError::SupplyExhausted { supply, cap, .. } => {
                ApiError::bad_request("Coin limit exceeded")
                    .with_ceiling(cap.saturating_sub(supply))
            }
            KudosError::ConsensusRejected { .. } => {
                ApiError::new(StatusCode::FORBIDDEN, "Not enough peer approvals")
            }
            other => {
                tracing::error!("Internal error: {}", other);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_errors_are_bad_requests() {
        let cases = [
            (KudosError::InvalidInput("bad".into()), "bad"),
            (KudosError::NotFound("post x".into()), "Post not found"),
            (
                KudosError::InsufficientLikes,
                "Not enough new likes to claim coins",
            ),
            (
                KudosError::ExceedsClaimable { max: 3 },
                "You can claim a maximum of 3 coins right now.",
            ),
            (
                KudosError::SupplyExhausted {
                    supply: 1,
                    requested: 2,
                    cap: 2,
                },
                "Coin limit exceeded",
            ),
        ];
        for (err, message) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status, StatusCode::BAD_REQUEST);
            assert_eq!(api.body.error, message);
        }
    }

    #[test]
    fn test_ceiling_is_surfaced() {
        let api: ApiError = KudosError::ExceedsClaimable { max: 7 }.into();
        assert_eq!(api.body.max_claimable, Some(7));
        let api: ApiError = KudosError::InsufficientLikes.into();
        assert_eq!(api.body.max_claimable, Some(0));
        let api: ApiError = KudosError::NotFound("x".into()).into();
        assert_eq!(api.body.max_claimable, None);
    }

    #[test]
    fn test_supply_exhaustion_reports_remaining_cap() {
        let api: ApiError = KudosError::SupplyExhausted {
            supply: 99_998,
            requested: 5,
            cap: 100_000,
        }
        .into();
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.body.error, "Coin limit exceeded");
        assert_eq!(api.body.max_claimable, Some(2));
    }

    #[test]
    fn test_consensus_rejection_is_forbidden() {
        let api: ApiError = KudosError::ConsensusRejected {
            approvals: 0,
            required: 1,
        }
        .into();
        assert_eq!(api.status, StatusCode::FORBIDDEN);
        assert_eq!(api.body.error, "Not enough peer approvals");
    }

    #[test]
    fn test_internal_errors() {
        let api: ApiError = KudosError::Serialization("boom".into()).into();
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
