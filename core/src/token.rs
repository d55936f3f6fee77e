//! The dividend-bearing token
//!
//! [`DividendToken`] is the single context struct behind the public
//! surface: it owns the balance ledger, the treasurer registry, the
//! dividend engine and a handle to the clock, and enforces who may do what
//! before delegating to them. Constructed once with a fixed owner and kept
//! for the life of the process.

use std::collections::HashMap;
use std::sync::Arc;

use crate::clock::Clock;
use crate::constants::{CLAIM_PERIOD_SECS, RECLAIM_PERIOD_SECS};
use crate::dividend::{DividendEngine, DividendStats, RoundPhase};
use crate::error::{Result, TokenError};
use crate::ledger::AccountLedger;
use crate::treasurer::{AccessControl, TreasurerRegistry};

pub struct DividendToken {
    access: AccessControl,
    ledger: AccountLedger,
    treasurers: TreasurerRegistry,
    engine: DividendEngine,
    clock: Arc<dyn Clock>,
    /// Cumulative value paid out per address (claims and owner sweeps).
    /// Models the host environment's value transfers.
    payouts: HashMap<String, u64>,
}

impl DividendToken {
    /// New token with the default 330-day claim / 20-day reclaim schedule.
    pub fn new(owner: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self::with_schedule(owner, clock, CLAIM_PERIOD_SECS, RECLAIM_PERIOD_SECS)
    }

    pub fn with_schedule(
        owner: impl Into<String>,
        clock: Arc<dyn Clock>,
        claim_period_secs: u64,
        reclaim_period_secs: u64,
    ) -> Self {
        Self {
            access: AccessControl::new(owner),
            ledger: AccountLedger::new(),
            treasurers: TreasurerRegistry::new(),
            engine: DividendEngine::new(claim_period_secs, reclaim_period_secs),
            clock,
            payouts: HashMap::new(),
        }
    }

    pub fn owner(&self) -> &str {
        self.access.owner()
    }

    /// True for the owner and for any address with an active treasurer
    /// flag.
    pub fn is_treasurer(&self, address: &str) -> bool {
        self.access.is_owner(address) || self.treasurers.is_active(address)
    }

    /// Owner-only: set an address's authorized-funder flag. Idempotent.
    pub fn set_treasurer(&mut self, caller: &str, address: &str, active: bool) -> Result<()> {
        self.access.require_owner(caller, "set treasurers")?;
        self.treasurers.set(address, active);
        log::info!(
            "treasurer {} set {} by owner",
            address,
            if active { "active" } else { "inactive" }
        );
        Ok(())
    }

    /// Owner-only: create new tokens for `to`.
    pub fn mint(&mut self, caller: &str, to: &str, amount: u64) -> Result<()> {
        self.access.require_owner(caller, "mint")?;
        self.ledger.mint(to, amount)?;
        log::info!("minted {} tokens for {}", amount, to);
        Ok(())
    }

    pub fn balance_of(&self, address: &str) -> u64 {
        self.ledger.balance_of(address)
    }

    pub fn total_supply(&self) -> u64 {
        self.ledger.total_supply()
    }

    pub fn transfer(&mut self, caller: &str, to: &str, amount: u64) -> Result<()> {
        self.ledger.transfer(caller, to, amount)
    }

    pub fn approve(&mut self, caller: &str, spender: &str, amount: u64) {
        self.ledger.approve(caller, spender, amount)
    }

    pub fn allowance(&self, owner: &str, spender: &str) -> u64 {
        self.ledger.allowance(owner, spender)
    }

    pub fn transfer_from(&mut self, caller: &str, from: &str, to: &str, amount: u64) -> Result<()> {
        self.ledger.transfer_from(caller, from, to, amount)
    }

    /// Deposit `amount` of value into the dividend pool.
    ///
    /// Unauthorized senders are rejected outright; no value is accepted
    /// from them.
    pub fn fund(&mut self, caller: &str, amount: u64) -> Result<()> {
        if !self.access.is_authorized_funder(caller, &self.treasurers) {
            return Err(TokenError::Unauthorized(format!(
                "{} is not an authorized funder",
                caller
            )));
        }

        let now = self.clock.now();
        self.engine.fund(amount, now)?;
        log::info!(
            "dividend deposit of {} from {}, pool now {}",
            amount,
            caller,
            self.engine.pool()
        );
        Ok(())
    }

    /// Value currently held for distribution.
    pub fn current_dividend(&self) -> u64 {
        self.engine.pool()
    }

    /// End of the current claim window; zero when no round is open.
    pub fn end_time(&self) -> u64 {
        self.engine.end_time()
    }

    /// Entitlement still claimable by `address` this round.
    pub fn unclaimed_dividend(&self, address: &str) -> u64 {
        self.engine
            .unclaimed_of(address, &self.ledger, self.clock.now())
    }

    /// Pull the caller's pro-rata share of the current round. Returns the
    /// amount of value transferred to the caller.
    pub fn claim_dividend(&mut self, caller: &str) -> Result<u64> {
        let now = self.clock.now();
        let share = self.engine.claim(caller, &self.ledger, now)?;
        self.credit_payout(caller, share);
        log::info!("{} claimed dividend of {}", caller, share);
        Ok(share)
    }

    /// Owner-only: sweep the unclaimed remainder of a closed round back to
    /// the owner. Returns the swept amount (zero once the pool is empty).
    pub fn request_unclaimed(&mut self, caller: &str) -> Result<u64> {
        self.access.require_owner(caller, "reclaim unclaimed dividends")?;
        let now = self.clock.now();
        let remainder = self.engine.sweep(now)?;
        if remainder > 0 {
            let owner = self.access.owner().to_string();
            self.credit_payout(&owner, remainder);
            log::info!("swept unclaimed dividend of {} to owner", remainder);
        }
        Ok(remainder)
    }

    /// Cumulative value paid out to `address` over all rounds.
    pub fn value_received(&self, address: &str) -> u64 {
        self.payouts.get(address).copied().unwrap_or(0)
    }

    pub fn phase(&self) -> RoundPhase {
        self.engine.phase(self.clock.now())
    }

    pub fn dividend_stats(&self) -> DividendStats {
        self.engine.stats(self.clock.now())
    }

    pub fn account_count(&self) -> usize {
        self.ledger.account_count()
    }

    fn credit_payout(&mut self, address: &str, amount: u64) {
        let entry = self.payouts.entry(address.to_string()).or_insert(0);
        *entry = entry.saturating_add(amount);
    }
}
