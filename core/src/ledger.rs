//! Account balance ledger
//!
//! Holds per-account token balances and the total supply. Accounts are
//! created implicitly on first mint or credit and never destroyed. The
//! ledger is pure bookkeeping: authorization (who may mint) is enforced by
//! the owning [`crate::token::DividendToken`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Result, TokenError};

/// A single token account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub address: String,
    pub balance: u64,
}

/// Token balances, total supply and delegated-transfer allowances.
///
/// Invariant: the sum of all balances equals `total_supply` at every
/// observation point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountLedger {
    accounts: HashMap<String, Account>,
    /// owner -> spender -> approved amount
    allowances: HashMap<String, HashMap<String, u64>>,
    total_supply: u64,
}

impl AccountLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of an account; unknown accounts read as zero.
    pub fn balance_of(&self, address: &str) -> u64 {
        self.accounts
            .get(address)
            .map(|acc| acc.balance)
            .unwrap_or(0)
    }

    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Create `amount` new tokens for `to`.
    pub fn mint(&mut self, to: &str, amount: u64) -> Result<()> {
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or_else(|| TokenError::Overflow("total supply".to_string()))?;

        self.credit(to, amount);
        self.total_supply = new_supply;

        Ok(())
    }

    /// Move `amount` tokens from `from` to `to`. Supply is preserved.
    pub fn transfer(&mut self, from: &str, to: &str, amount: u64) -> Result<()> {
        let available = self.balance_of(from);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                requested: amount,
                available,
            });
        }

        self.debit(from, amount);
        self.credit(to, amount);

        Ok(())
    }

    /// Approve `spender` to move up to `amount` tokens owned by `owner`.
    ///
    /// Overwrites any previous approval for the same pair.
    pub fn approve(&mut self, owner: &str, spender: &str, amount: u64) {
        self.allowances
            .entry(owner.to_string())
            .or_default()
            .insert(spender.to_string(), amount);
    }

    /// Remaining approval for the (owner, spender) pair.
    pub fn allowance(&self, owner: &str, spender: &str) -> u64 {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Delegated transfer: `spender` moves tokens from `from` to `to`
    /// against a prior approval. The allowance is decremented on success.
    pub fn transfer_from(
        &mut self,
        spender: &str,
        from: &str,
        to: &str,
        amount: u64,
    ) -> Result<()> {
        let approved = self.allowance(from, spender);
        if approved < amount {
            return Err(TokenError::InsufficientAllowance {
                requested: amount,
                approved,
            });
        }

        self.transfer(from, to, amount)?;
        self.allowances
            .entry(from.to_string())
            .or_default()
            .insert(spender.to_string(), approved - amount);

        Ok(())
    }

    fn credit(&mut self, address: &str, amount: u64) {
        let account = self
            .accounts
            .entry(address.to_string())
            .or_insert_with(|| Account {
                address: address.to_string(),
                balance: 0,
            });
        account.balance += amount;
    }

    fn debit(&mut self, address: &str, amount: u64) {
        if let Some(account) = self.accounts.get_mut(address) {
            account.balance -= amount;
        }
    }
}
