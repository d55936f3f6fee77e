//! Divvy Coin core ledger
//!
//! An account-balance registry with a periodic, pull-payment profit
//! distribution:
//! - the owner mints tokens and appoints treasurers
//! - owner and treasurers deposit value that opens (or tops up) a dividend
//!   round
//! - holders pull their pro-rata share while the claim window is open
//! - the owner sweeps whatever remains once the window has closed

pub mod clock;
pub mod dividend;
pub mod error;
pub mod ledger;
pub mod token;
pub mod treasurer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use dividend::{DividendEngine, DividendRound, DividendStats, RoundPhase};
pub use error::{Result, TokenError};
pub use ledger::{Account, AccountLedger};
pub use token::DividendToken;
pub use treasurer::{AccessControl, TreasurerRegistry};

/// Ledger constants
pub mod constants {
    /// Smallest value unit per whole coin (8 decimal places)
    pub const COIN: u64 = 100_000_000;

    /// Seconds per day
    pub const DAY_SECS: u64 = 86_400;

    /// Claim window length (330 days)
    pub const CLAIM_PERIOD_SECS: u64 = 330 * DAY_SECS;

    /// Reclaim grace period after the claim window (20 days)
    pub const RECLAIM_PERIOD_SECS: u64 = 20 * DAY_SECS;
}

#[cfg(test)]
mod tests {
    use super::constants::*;

    #[test]
    fn test_module_constants() {
        assert_eq!(COIN, 100_000_000);
        assert_eq!(CLAIM_PERIOD_SECS, 330 * 86_400);
        assert_eq!(RECLAIM_PERIOD_SECS, 20 * 86_400);
    }
}
