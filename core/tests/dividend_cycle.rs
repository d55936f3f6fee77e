//! End-to-end dividend cycle tests driving the public token surface.

use std::sync::Arc;

use divvy_core::constants::{CLAIM_PERIOD_SECS, DAY_SECS, RECLAIM_PERIOD_SECS};
use divvy_core::{Clock, DividendToken, ManualClock, RoundPhase, TokenError};

const OWNER: &str = "owner";
const TREASURER1: &str = "treasurer1";
const TREASURER2: &str = "treasurer2";
const INACTIVE_TREASURER: &str = "inactive_treasurer";
const HOLDER1: &str = "holder1";
const HOLDER2: &str = "holder2";

fn setup() -> (DividendToken, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(1_700_000_000));
    let token = DividendToken::new(OWNER, clock.clone());
    (token, clock)
}

/// Mint 5 tokens to each of two holders (total supply 10).
fn mint_holders(token: &mut DividendToken) {
    token.mint(OWNER, HOLDER1, 5).unwrap();
    token.mint(OWNER, HOLDER2, 5).unwrap();
}

#[test]
fn test_instantiation() {
    let (token, _) = setup();

    assert_eq!(token.owner(), OWNER);
    assert!(token.is_treasurer(OWNER));
    assert_eq!(token.total_supply(), 0);
    assert_eq!(token.current_dividend(), 0);
    assert_eq!(token.end_time(), 0);
    assert_eq!(token.phase(), RoundPhase::Idle);
}

#[test]
fn test_treasurer_administration() {
    let (mut token, _) = setup();

    token.set_treasurer(OWNER, TREASURER1, true).unwrap();
    token.set_treasurer(OWNER, TREASURER2, true).unwrap();
    token.set_treasurer(OWNER, INACTIVE_TREASURER, false).unwrap();

    assert!(token.is_treasurer(TREASURER1));
    assert!(token.is_treasurer(TREASURER2));
    assert!(!token.is_treasurer(INACTIVE_TREASURER));
}

#[test]
fn test_conservation_across_mint_and_transfer() {
    let (mut token, _) = setup();
    mint_holders(&mut token);

    token.transfer(HOLDER1, HOLDER2, 2).unwrap();
    token.transfer(HOLDER2, "holder3", 6).unwrap();

    let sum = token.balance_of(HOLDER1)
        + token.balance_of(HOLDER2)
        + token.balance_of("holder3");
    assert_eq!(sum, token.total_supply());
    assert_eq!(token.total_supply(), 10);
}

/// Scenario A: fund 10 over supply 10, two equal holders claim 5 each.
#[test]
fn test_pro_rata_claims_drain_pool() {
    let (mut token, _) = setup();
    mint_holders(&mut token);

    token.fund(OWNER, 10).unwrap();

    assert_eq!(token.claim_dividend(HOLDER1).unwrap(), 5);
    assert_eq!(token.claim_dividend(HOLDER2).unwrap(), 5);
    assert_eq!(token.current_dividend(), 0);
    assert_eq!(token.value_received(HOLDER1), 5);
    assert_eq!(token.value_received(HOLDER2), 5);

    assert_eq!(token.claim_dividend(HOLDER1), Err(TokenError::AlreadyClaimed));
    assert_eq!(token.claim_dividend(HOLDER2), Err(TokenError::AlreadyClaimed));
}

/// Scenario B: three deposits before the window closes accumulate into one
/// 30-unit pool without re-triggering the window.
#[test]
fn test_deposits_accumulate_into_one_round() {
    let (mut token, clock) = setup();
    mint_holders(&mut token);
    token.set_treasurer(OWNER, TREASURER1, true).unwrap();

    token.fund(OWNER, 10).unwrap();
    let end_time = token.end_time();
    assert_eq!(end_time, clock.now() + CLAIM_PERIOD_SECS);

    clock.advance(DAY_SECS);
    token.fund(OWNER, 10).unwrap();
    token.fund(TREASURER1, 10).unwrap();

    assert_eq!(token.current_dividend(), 30);
    assert_eq!(token.end_time(), end_time);
}

/// Unauthorized and deactivated senders are rejected outright; no value is
/// accepted (scenario D included).
#[test]
fn test_funding_authorization() {
    let (mut token, _) = setup();
    mint_holders(&mut token);
    token.set_treasurer(OWNER, TREASURER1, true).unwrap();
    token.set_treasurer(OWNER, INACTIVE_TREASURER, false).unwrap();

    token.fund(OWNER, 10).unwrap();

    assert!(matches!(
        token.fund(HOLDER1, 1),
        Err(TokenError::Unauthorized(_))
    ));
    assert!(matches!(
        token.fund(INACTIVE_TREASURER, 1),
        Err(TokenError::Unauthorized(_))
    ));
    assert_eq!(token.current_dividend(), 10);

    // A treasurer who successfully funded is rejected after deactivation
    token.fund(TREASURER1, 5).unwrap();
    token.set_treasurer(OWNER, TREASURER1, false).unwrap();
    assert!(matches!(
        token.fund(TREASURER1, 5),
        Err(TokenError::Unauthorized(_))
    ));
    assert_eq!(token.current_dividend(), 15);
}

#[test]
fn test_request_unclaimed_before_any_round() {
    let (mut token, _) = setup();

    assert_eq!(
        token.request_unclaimed(OWNER),
        Err(TokenError::ReclaimTooEarly)
    );
}

#[test]
fn test_request_unclaimed_is_owner_only() {
    let (mut token, clock) = setup();
    mint_holders(&mut token);
    token.fund(OWNER, 10).unwrap();
    clock.advance(CLAIM_PERIOD_SECS);

    assert!(matches!(
        token.request_unclaimed(HOLDER1),
        Err(TokenError::Unauthorized(_))
    ));
    assert_eq!(token.request_unclaimed(OWNER).unwrap(), 10);
}

/// Scenario C: once the claim period elapses claims fail and the owner may
/// sweep.
#[test]
fn test_claim_window_enforcement() {
    let (mut token, clock) = setup();
    mint_holders(&mut token);

    token.fund(OWNER, 10).unwrap();
    assert_eq!(token.request_unclaimed(OWNER), Err(TokenError::ReclaimTooEarly));

    clock.advance(CLAIM_PERIOD_SECS);

    assert_eq!(token.claim_dividend(HOLDER1), Err(TokenError::ClaimWindowClosed));
    assert_eq!(token.unclaimed_dividend(HOLDER1), 0);
    assert_eq!(token.phase(), RoundPhase::ReclaimWindow);

    assert_eq!(token.request_unclaimed(OWNER).unwrap(), 10);
    assert_eq!(token.current_dividend(), 0);
    assert_eq!(token.value_received(OWNER), 10);
}

/// The full cycle of the original acceptance sequence: administer
/// treasurers, mint, fund three times, reject bad funders, claim, transfer,
/// jump past the claim window, sweep, and settle.
#[test]
fn test_full_dividend_cycle() {
    let (mut token, clock) = setup();

    token.set_treasurer(OWNER, TREASURER1, true).unwrap();
    token.set_treasurer(OWNER, TREASURER2, true).unwrap();
    token.set_treasurer(OWNER, INACTIVE_TREASURER, false).unwrap();
    mint_holders(&mut token);

    // [ Claim period ]
    token.fund(OWNER, 10).unwrap();
    let end_time = token.end_time();
    assert!(end_time > 0);

    token.fund(OWNER, 10).unwrap();
    token.fund(TREASURER1, 10).unwrap();
    assert_eq!(token.current_dividend(), 30);
    assert_eq!(token.end_time(), end_time);

    assert!(token.fund(HOLDER1, 1).is_err());
    assert!(token.fund(INACTIVE_TREASURER, 1).is_err());
    assert!(token.request_unclaimed(OWNER).is_err());

    assert_eq!(token.unclaimed_dividend(HOLDER1), 15);
    assert_eq!(token.claim_dividend(HOLDER1).unwrap(), 15);
    assert_eq!(token.claim_dividend(HOLDER2).unwrap(), 15);
    assert_eq!(token.unclaimed_dividend(HOLDER1), 0);
    assert_eq!(token.current_dividend(), 0);

    token.transfer(HOLDER1, HOLDER2, 5).unwrap();
    assert_eq!(token.balance_of(HOLDER2), 10);

    // [ Reclaim period ]
    clock.advance(330 * DAY_SECS);
    assert_eq!(token.claim_dividend(HOLDER1), Err(TokenError::ClaimWindowClosed));
    assert_eq!(token.request_unclaimed(OWNER).unwrap(), 0);

    // [ Dividend cycle is over ]
    clock.advance(20 * DAY_SECS);
    assert_eq!(token.phase(), RoundPhase::Settled);
    token.fund(OWNER, 10).unwrap();
    assert_eq!(token.phase(), RoundPhase::Claimable);
    assert_eq!(token.claim_dividend(HOLDER2).unwrap(), 10);
}

#[test]
fn test_rounding_dust_swept_to_owner() {
    let (mut token, clock) = setup();
    token.mint(OWNER, "a", 1).unwrap();
    token.mint(OWNER, "b", 1).unwrap();
    token.mint(OWNER, "c", 1).unwrap();

    token.fund(OWNER, 10).unwrap();

    assert_eq!(token.claim_dividend("a").unwrap(), 3);
    assert_eq!(token.claim_dividend("b").unwrap(), 3);
    assert_eq!(token.claim_dividend("c").unwrap(), 3);
    assert_eq!(token.current_dividend(), 1);

    clock.advance(CLAIM_PERIOD_SECS);
    assert_eq!(token.request_unclaimed(OWNER).unwrap(), 1);

    // Every deposited unit is accounted for: claims plus sweep equal the pool
    let paid = token.value_received("a")
        + token.value_received("b")
        + token.value_received("c")
        + token.value_received(OWNER);
    assert_eq!(paid, 10);
}

#[test]
fn test_reopening_blocked_until_swept() {
    let (mut token, clock) = setup();
    mint_holders(&mut token);

    token.fund(OWNER, 10).unwrap();
    clock.advance(CLAIM_PERIOD_SECS);

    assert!(matches!(
        token.fund(OWNER, 10),
        Err(TokenError::RoundNotSettled(_))
    ));

    clock.advance(RECLAIM_PERIOD_SECS);
    assert!(matches!(
        token.fund(OWNER, 10),
        Err(TokenError::RoundNotSettled(_))
    ));

    token.request_unclaimed(OWNER).unwrap();
    token.fund(OWNER, 10).unwrap();
    assert_eq!(token.current_dividend(), 10);
}

#[test]
fn test_zero_balance_claim_rejected() {
    let (mut token, _) = setup();
    mint_holders(&mut token);

    token.fund(OWNER, 10).unwrap();

    assert_eq!(token.claim_dividend("stranger"), Err(TokenError::NothingToClaim));
}

#[test]
fn test_zero_deposit_rejected() {
    let (mut token, _) = setup();

    assert!(matches!(
        token.fund(OWNER, 0),
        Err(TokenError::InvalidAmount(_))
    ));
    assert_eq!(token.phase(), RoundPhase::Idle);
}

#[test]
fn test_delegated_transfer() {
    let (mut token, _) = setup();
    mint_holders(&mut token);

    token.approve(HOLDER1, HOLDER2, 5);
    assert_eq!(token.allowance(HOLDER1, HOLDER2), 5);

    token.transfer_from(HOLDER2, HOLDER1, HOLDER2, 5).unwrap();
    assert_eq!(token.balance_of(HOLDER2), 10);
    assert_eq!(token.allowance(HOLDER1, HOLDER2), 0);

    assert_eq!(
        token.transfer_from(HOLDER2, HOLDER1, HOLDER2, 1),
        Err(TokenError::InsufficientAllowance {
            requested: 1,
            approved: 0
        })
    );
}

/// A transfer between round-open and claim changes entitlement: balances
/// are read live at claim time.
#[test]
fn test_entitlement_reads_live_balances() {
    let (mut token, _) = setup();
    mint_holders(&mut token);

    token.fund(OWNER, 10).unwrap();
    token.transfer(HOLDER1, HOLDER2, 5).unwrap();

    assert_eq!(token.claim_dividend(HOLDER2).unwrap(), 10);
    assert_eq!(token.claim_dividend(HOLDER1), Err(TokenError::NothingToClaim));
}
