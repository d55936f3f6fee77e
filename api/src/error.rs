//! API Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use divvy_core::TokenError;
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Manual clock is not enabled on this node")]
    ManualClockDisabled,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::Token(err) => {
                let status = match &err {
                    TokenError::Unauthorized(_) => StatusCode::FORBIDDEN,
                    TokenError::InsufficientBalance { .. }
                    | TokenError::InsufficientAllowance { .. }
                    | TokenError::Overflow(_)
                    | TokenError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
                    TokenError::ClaimWindowClosed
                    | TokenError::AlreadyClaimed
                    | TokenError::NothingToClaim
                    | TokenError::ReclaimTooEarly
                    | TokenError::RoundNotSettled(_) => StatusCode::CONFLICT,
                };
                (status, error_label(&err), err.to_string())
            }
            ApiError::ManualClockDisabled => (
                StatusCode::FORBIDDEN,
                "manual_clock_disabled",
                "Manual clock is not enabled on this node".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_type,
            "message": message,
        }));

        (status, body).into_response()
    }
}

fn error_label(err: &TokenError) -> &'static str {
    match err {
        TokenError::Unauthorized(_) => "unauthorized",
        TokenError::InsufficientBalance { .. } => "insufficient_balance",
        TokenError::InsufficientAllowance { .. } => "insufficient_allowance",
        TokenError::Overflow(_) => "overflow",
        TokenError::InvalidAmount(_) => "invalid_amount",
        TokenError::ClaimWindowClosed => "claim_window_closed",
        TokenError::AlreadyClaimed => "already_claimed",
        TokenError::NothingToClaim => "nothing_to_claim",
        TokenError::ReclaimTooEarly => "reclaim_too_early",
        TokenError::RoundNotSettled(_) => "round_not_settled",
    }
}
