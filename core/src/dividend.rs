//! Dividend round state machine and claim accounting
//!
//! One round at a time: authorized deposits open a round and pool value,
//! holders pull their pro-rata share while the claim window is open, and
//! the owner sweeps whatever remains once the window has closed. The phase
//! of a round is derived from the current time and the pool, never stored.
//!
//! This is a pull-payment design: each claim does bounded, single-account
//! work, so cost does not grow with the number of holders.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::constants::{CLAIM_PERIOD_SECS, RECLAIM_PERIOD_SECS};
use crate::error::{Result, TokenError};
use crate::ledger::AccountLedger;

/// Phase of the current round, derived from time and pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No round has been opened (or the last one was fully settled and
    /// replaced).
    Idle,
    /// Deposits accumulate and holders may claim.
    Claimable,
    /// Claims are closed; the owner may sweep the remainder.
    ReclaimWindow,
    /// The reclaim window has fully elapsed; a new round may open once the
    /// pool is empty.
    Settled,
}

/// A single funding-to-settlement cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DividendRound {
    /// Cumulative deposits into this round. Entitlements are computed
    /// against this figure, not the shrinking remainder.
    pub funded: u64,
    /// Value still held for distribution.
    pub pool: u64,
    pub start_time: u64,
    pub end_time: u64,
    pub reclaim_deadline: u64,
    /// Addresses that have already claimed this round. A new round starts
    /// with an empty set, which is the per-round claim-flag reset.
    claimed: HashSet<String>,
}

impl DividendRound {
    fn open(amount: u64, now: u64, claim_period_secs: u64, reclaim_period_secs: u64) -> Self {
        let end_time = now + claim_period_secs;
        Self {
            funded: amount,
            pool: amount,
            start_time: now,
            end_time,
            reclaim_deadline: end_time + reclaim_period_secs,
            claimed: HashSet::new(),
        }
    }

    pub fn has_claimed(&self, address: &str) -> bool {
        self.claimed.contains(address)
    }

    pub fn claim_count(&self) -> usize {
        self.claimed.len()
    }
}

/// Aggregate view of the engine for API consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DividendStats {
    pub phase: RoundPhase,
    pub pool: u64,
    pub funded: u64,
    pub start_time: u64,
    pub end_time: u64,
    pub reclaim_deadline: u64,
    pub claim_count: usize,
    pub total_distributed: u64,
    pub total_reclaimed: u64,
}

/// The dividend-cycle state machine.
///
/// The engine is agnostic of identity: authorization (owner vs. treasurer
/// vs. holder) is decided by the caller before any of these methods run.
/// Time arrives as an explicit parameter so the engine itself never touches
/// a clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DividendEngine {
    round: Option<DividendRound>,
    claim_period_secs: u64,
    reclaim_period_secs: u64,
    total_distributed: u64,
    total_reclaimed: u64,
}

impl DividendEngine {
    pub fn new(claim_period_secs: u64, reclaim_period_secs: u64) -> Self {
        Self {
            round: None,
            claim_period_secs,
            reclaim_period_secs,
            total_distributed: 0,
            total_reclaimed: 0,
        }
    }

    /// Current phase as derived from `now` and the stored round.
    pub fn phase(&self, now: u64) -> RoundPhase {
        match &self.round {
            None => RoundPhase::Idle,
            Some(round) if now < round.end_time => RoundPhase::Claimable,
            Some(round) if now < round.reclaim_deadline => RoundPhase::ReclaimWindow,
            Some(_) => RoundPhase::Settled,
        }
    }

    /// Add `amount` to the current round, or open a new round if none is
    /// active.
    ///
    /// Deposits before `end_time` accumulate without moving the window. A
    /// new round may only open once the previous round's reclaim window has
    /// fully elapsed and its pool has been swept.
    pub fn fund(&mut self, amount: u64, now: u64) -> Result<()> {
        if amount == 0 {
            return Err(TokenError::InvalidAmount(
                "deposit must be non-zero".to_string(),
            ));
        }

        match self.round.as_mut() {
            Some(round) if now < round.end_time => {
                let funded = round
                    .funded
                    .checked_add(amount)
                    .ok_or_else(|| TokenError::Overflow("dividend pool".to_string()))?;
                let pool = round
                    .pool
                    .checked_add(amount)
                    .ok_or_else(|| TokenError::Overflow("dividend pool".to_string()))?;
                round.funded = funded;
                round.pool = pool;
            }
            Some(round) if now < round.reclaim_deadline => {
                return Err(TokenError::RoundNotSettled(
                    "reclaim window is still open".to_string(),
                ));
            }
            Some(round) if round.pool > 0 => {
                return Err(TokenError::RoundNotSettled(
                    "unclaimed pool must be swept first".to_string(),
                ));
            }
            _ => {
                self.round = Some(DividendRound::open(
                    amount,
                    now,
                    self.claim_period_secs,
                    self.reclaim_period_secs,
                ));
            }
        }

        Ok(())
    }

    /// Pay out the caller's pro-rata share of the current round.
    ///
    /// Returns the amount to credit to the caller. The share is
    /// `floor(funded * balance / total_supply)`, capped at the remaining
    /// pool; integer truncation leaves dust in the pool for the final
    /// sweep.
    pub fn claim(&mut self, caller: &str, ledger: &AccountLedger, now: u64) -> Result<u64> {
        let round = match self.round.as_mut() {
            Some(round) if now < round.end_time => round,
            _ => return Err(TokenError::ClaimWindowClosed),
        };

        if round.claimed.contains(caller) {
            return Err(TokenError::AlreadyClaimed);
        }

        let share = entitlement(
            round.funded,
            ledger.balance_of(caller),
            ledger.total_supply(),
        )
        .min(round.pool);
        if share == 0 {
            return Err(TokenError::NothingToClaim);
        }

        round.pool -= share;
        round.claimed.insert(caller.to_string());
        self.total_distributed = self.total_distributed.saturating_add(share);

        Ok(share)
    }

    /// Sweep the remaining pool once the claim window has closed.
    ///
    /// Returns the swept amount. Sweeping an already-empty pool is a no-op
    /// returning zero, not an error; sweeping before `end_time` (including
    /// when no round was ever opened) fails.
    pub fn sweep(&mut self, now: u64) -> Result<u64> {
        let round = match self.round.as_mut() {
            Some(round) if now >= round.end_time => round,
            _ => return Err(TokenError::ReclaimTooEarly),
        };

        let remainder = round.pool;
        round.pool = 0;
        self.total_reclaimed = self.total_reclaimed.saturating_add(remainder);

        Ok(remainder)
    }

    /// Value still held for distribution; zero when idle.
    pub fn pool(&self) -> u64 {
        self.round.as_ref().map(|round| round.pool).unwrap_or(0)
    }

    /// End of the current claim window; zero when idle.
    pub fn end_time(&self) -> u64 {
        self.round.as_ref().map(|round| round.end_time).unwrap_or(0)
    }

    /// Entitlement still claimable by `address` this round, or zero if the
    /// window is closed, the address has claimed, or it holds no tokens.
    pub fn unclaimed_of(&self, address: &str, ledger: &AccountLedger, now: u64) -> u64 {
        match &self.round {
            Some(round) if now < round.end_time && !round.claimed.contains(address) => {
                entitlement(round.funded, ledger.balance_of(address), ledger.total_supply())
                    .min(round.pool)
            }
            _ => 0,
        }
    }

    pub fn round(&self) -> Option<&DividendRound> {
        self.round.as_ref()
    }

    pub fn stats(&self, now: u64) -> DividendStats {
        DividendStats {
            phase: self.phase(now),
            pool: self.pool(),
            funded: self.round.as_ref().map(|round| round.funded).unwrap_or(0),
            start_time: self
                .round
                .as_ref()
                .map(|round| round.start_time)
                .unwrap_or(0),
            end_time: self.end_time(),
            reclaim_deadline: self
                .round
                .as_ref()
                .map(|round| round.reclaim_deadline)
                .unwrap_or(0),
            claim_count: self
                .round
                .as_ref()
                .map(|round| round.claim_count())
                .unwrap_or(0),
            total_distributed: self.total_distributed,
            total_reclaimed: self.total_reclaimed,
        }
    }
}

impl Default for DividendEngine {
    fn default() -> Self {
        Self::new(CLAIM_PERIOD_SECS, RECLAIM_PERIOD_SECS)
    }
}

/// `floor(funded * balance / supply)` in widened integer math. Division
/// truncates toward zero; the remainder stays in the pool.
fn entitlement(funded: u64, balance: u64, supply: u64) -> u64 {
    if supply == 0 {
        return 0;
    }
    (funded as u128 * balance as u128 / supply as u128) as u64
}
