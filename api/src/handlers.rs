//! HTTP handlers for the token and dividend surface
//!
//! The `/deposit` endpoint is the boundary adapter for inbound value:
//! every deposit is a funding call, and an unauthorized sender has the
//! whole request rejected with no value accepted.
//!
//! Caller identity travels in the request body (`from`); signature checks
//! and transaction submission live outside this system.

use axum::{
    extract::{Path, State},
    Json,
};
use divvy_core::{Clock, DividendStats, RoundPhase};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{ApiError, ApiResult, ApiState};

/// Node summary served at `/`
#[derive(Debug, Serialize)]
pub struct NodeInfoResponse {
    pub name: String,
    pub network: String,
    pub uptime_secs: u64,
    pub owner: String,
    pub total_supply: u64,
    pub accounts: usize,
    pub phase: RoundPhase,
    pub current_dividend: u64,
}

#[derive(Debug, Serialize)]
pub struct OwnerResponse {
    pub owner: String,
}

#[derive(Debug, Serialize)]
pub struct TreasurerResponse {
    pub address: String,
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct SetTreasurerRequest {
    pub from: String,
    pub address: String,
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct MintRequest {
    pub from: String,
    pub to: String,
    pub amount: u64,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub address: String,
    pub balance: u64,
}

#[derive(Debug, Serialize)]
pub struct SupplyResponse {
    pub total_supply: u64,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub from: String,
    pub to: String,
    pub amount: u64,
}

#[derive(Debug, Deserialize)]
pub struct TransferFromRequest {
    pub spender: String,
    pub from: String,
    pub to: String,
    pub amount: u64,
}

#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub from: String,
    pub to: String,
    pub amount: u64,
}

#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    pub from: String,
    pub spender: String,
    pub amount: u64,
}

#[derive(Debug, Serialize)]
pub struct AllowanceResponse {
    pub owner: String,
    pub spender: String,
    pub amount: u64,
}

#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    pub from: String,
    pub amount: u64,
}

#[derive(Debug, Serialize)]
pub struct DepositResponse {
    pub pool: u64,
    pub end_time: u64,
}

#[derive(Debug, Serialize)]
pub struct UnclaimedResponse {
    pub address: String,
    pub amount: u64,
}

#[derive(Debug, Deserialize)]
pub struct ClaimRequest {
    pub from: String,
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub address: String,
    pub amount: u64,
}

#[derive(Debug, Serialize)]
pub struct PayoutResponse {
    pub address: String,
    pub value_received: u64,
}

#[derive(Debug, Deserialize)]
pub struct AdvanceClockRequest {
    pub seconds: u64,
}

#[derive(Debug, Serialize)]
pub struct ClockResponse {
    pub now: u64,
}

pub async fn root(State(state): State<ApiState>) -> Json<NodeInfoResponse> {
    let token = state.token.read().await;

    Json(NodeInfoResponse {
        name: "Divvy Coin".to_string(),
        network: state.network.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        owner: token.owner().to_string(),
        total_supply: token.total_supply(),
        accounts: token.account_count(),
        phase: token.phase(),
        current_dividend: token.current_dividend(),
    })
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn get_owner(State(state): State<ApiState>) -> Json<OwnerResponse> {
    let token = state.token.read().await;
    Json(OwnerResponse {
        owner: token.owner().to_string(),
    })
}

pub async fn get_treasurer(
    State(state): State<ApiState>,
    Path(address): Path<String>,
) -> Json<TreasurerResponse> {
    let token = state.token.read().await;
    let active = token.is_treasurer(&address);
    Json(TreasurerResponse { address, active })
}

pub async fn set_treasurer(
    State(state): State<ApiState>,
    Json(req): Json<SetTreasurerRequest>,
) -> ApiResult<Json<TreasurerResponse>> {
    let mut token = state.token.write().await;
    token.set_treasurer(&req.from, &req.address, req.active)?;

    Ok(Json(TreasurerResponse {
        active: token.is_treasurer(&req.address),
        address: req.address,
    }))
}

pub async fn mint(
    State(state): State<ApiState>,
    Json(req): Json<MintRequest>,
) -> ApiResult<Json<BalanceResponse>> {
    let mut token = state.token.write().await;
    token.mint(&req.from, &req.to, req.amount)?;

    Ok(Json(BalanceResponse {
        balance: token.balance_of(&req.to),
        address: req.to,
    }))
}

pub async fn get_balance(
    State(state): State<ApiState>,
    Path(address): Path<String>,
) -> Json<BalanceResponse> {
    let token = state.token.read().await;
    let balance = token.balance_of(&address);
    Json(BalanceResponse { address, balance })
}

pub async fn get_supply(State(state): State<ApiState>) -> Json<SupplyResponse> {
    let token = state.token.read().await;
    Json(SupplyResponse {
        total_supply: token.total_supply(),
    })
}

pub async fn transfer(
    State(state): State<ApiState>,
    Json(req): Json<TransferRequest>,
) -> ApiResult<Json<TransferResponse>> {
    let mut token = state.token.write().await;
    token.transfer(&req.from, &req.to, req.amount)?;

    Ok(Json(TransferResponse {
        from: req.from,
        to: req.to,
        amount: req.amount,
    }))
}

pub async fn approve(
    State(state): State<ApiState>,
    Json(req): Json<ApproveRequest>,
) -> Json<AllowanceResponse> {
    let mut token = state.token.write().await;
    token.approve(&req.from, &req.spender, req.amount);

    Json(AllowanceResponse {
        amount: token.allowance(&req.from, &req.spender),
        owner: req.from,
        spender: req.spender,
    })
}

pub async fn get_allowance(
    State(state): State<ApiState>,
    Path((owner, spender)): Path<(String, String)>,
) -> Json<AllowanceResponse> {
    let token = state.token.read().await;
    let amount = token.allowance(&owner, &spender);
    Json(AllowanceResponse {
        owner,
        spender,
        amount,
    })
}

pub async fn transfer_from(
    State(state): State<ApiState>,
    Json(req): Json<TransferFromRequest>,
) -> ApiResult<Json<TransferResponse>> {
    let mut token = state.token.write().await;
    token.transfer_from(&req.spender, &req.from, &req.to, req.amount)?;

    Ok(Json(TransferResponse {
        from: req.from,
        to: req.to,
        amount: req.amount,
    }))
}

/// Inbound value transfer: fund the dividend pool.
pub async fn deposit(
    State(state): State<ApiState>,
    Json(req): Json<DepositRequest>,
) -> ApiResult<Json<DepositResponse>> {
    let mut token = state.token.write().await;
    token.fund(&req.from, req.amount)?;

    Ok(Json(DepositResponse {
        pool: token.current_dividend(),
        end_time: token.end_time(),
    }))
}

pub async fn get_dividend(State(state): State<ApiState>) -> Json<DividendStats> {
    let token = state.token.read().await;
    Json(token.dividend_stats())
}

pub async fn get_unclaimed(
    State(state): State<ApiState>,
    Path(address): Path<String>,
) -> Json<UnclaimedResponse> {
    let token = state.token.read().await;
    let amount = token.unclaimed_dividend(&address);
    Json(UnclaimedResponse { address, amount })
}

pub async fn claim_dividend(
    State(state): State<ApiState>,
    Json(req): Json<ClaimRequest>,
) -> ApiResult<Json<ClaimResponse>> {
    let mut token = state.token.write().await;
    let amount = token.claim_dividend(&req.from)?;

    Ok(Json(ClaimResponse {
        address: req.from,
        amount,
    }))
}

pub async fn request_unclaimed(
    State(state): State<ApiState>,
    Json(req): Json<ClaimRequest>,
) -> ApiResult<Json<ClaimResponse>> {
    let mut token = state.token.write().await;
    let amount = token.request_unclaimed(&req.from)?;

    Ok(Json(ClaimResponse {
        address: req.from,
        amount,
    }))
}

pub async fn get_payout(
    State(state): State<ApiState>,
    Path(address): Path<String>,
) -> Json<PayoutResponse> {
    let token = state.token.read().await;
    let value_received = token.value_received(&address);
    Json(PayoutResponse {
        address,
        value_received,
    })
}

/// Dev-mode only: jump the node clock forward.
pub async fn advance_clock(
    State(state): State<ApiState>,
    Json(req): Json<AdvanceClockRequest>,
) -> ApiResult<Json<ClockResponse>> {
    let clock = state
        .dev_clock
        .as_ref()
        .ok_or(ApiError::ManualClockDisabled)?;

    clock.advance(req.seconds);
    tracing::info!("manual clock advanced by {}s", req.seconds);

    Ok(Json(ClockResponse { now: clock.now() }))
}
