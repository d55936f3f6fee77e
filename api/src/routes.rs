//! Route table for the Divvy node API

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{
    advance_clock, approve, claim_dividend, deposit, get_allowance, get_balance, get_dividend,
    get_owner, get_payout, get_supply, get_treasurer, get_unclaimed, health_check, mint,
    request_unclaimed, root, set_treasurer, transfer, transfer_from,
};
use crate::ApiState;

pub fn create_routes() -> Router<ApiState> {
    Router::new()
        // Node endpoints
        .route("/", get(root))
        .route("/health", get(health_check))
        // Ownership and treasurer administration
        .route("/owner", get(get_owner))
        .route("/treasurer/{address}", get(get_treasurer))
        .route("/treasurer", post(set_treasurer))
        // Token ledger endpoints
        .route("/mint", post(mint))
        .route("/balance/{address}", get(get_balance))
        .route("/supply", get(get_supply))
        .route("/transfer", post(transfer))
        .route("/approve", post(approve))
        .route("/allowance/{owner}/{spender}", get(get_allowance))
        .route("/transfer-from", post(transfer_from))
        // Dividend endpoints
        .route("/deposit", post(deposit))
        .route("/dividend", get(get_dividend))
        .route("/dividend/unclaimed/{address}", get(get_unclaimed))
        .route("/dividend/claim", post(claim_dividend))
        .route("/dividend/reclaim", post(request_unclaimed))
        .route("/payouts/{address}", get(get_payout))
        // Dev-mode clock control
        .route("/clock/advance", post(advance_clock))
}
