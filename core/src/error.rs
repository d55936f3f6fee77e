//! Ledger and dividend error types

use thiserror::Error;

/// Errors surfaced by token and dividend operations.
///
/// Every failure is scoped to the single call that raised it; no operation
/// leaves partial state behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: u64, available: u64 },

    #[error("Insufficient allowance: requested {requested}, approved {approved}")]
    InsufficientAllowance { requested: u64, approved: u64 },

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Claim window is closed")]
    ClaimWindowClosed,

    #[error("Dividend already claimed in this round")]
    AlreadyClaimed,

    #[error("Nothing to claim")]
    NothingToClaim,

    #[error("Reclaim period has not begun")]
    ReclaimTooEarly,

    #[error("Previous dividend round not settled: {0}")]
    RoundNotSettled(String),
}

pub type Result<T> = std::result::Result<T, TokenError>;
