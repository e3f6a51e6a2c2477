//! End-to-end succession scenarios for the custody state machine.
//!
//! Replays the full acceptance suite against the pure vault with an
//! explicit clock: construction, withdrawals (including the zero-amount
//! heartbeat), heir updates, and the heir's ownership claim after the
//! 30-day window — plus the subtle corner where the clock is NOT reset
//! by the claim itself.

use heirloom_custody::{Address, CustodyError, CustodyEvent, CustodyVault, TIMELOCK_WINDOW_SECS};

const T0: u64 = 1_700_000_000;

fn owner() -> Address {
    "0x1111111111111111111111111111111111111111".parse().unwrap()
}

fn heir() -> Address {
    "0x2222222222222222222222222222222222222222".parse().unwrap()
}

fn new_heir() -> Address {
    "0x3333333333333333333333333333333333333333".parse().unwrap()
}

fn deploy(deposit: u128) -> (CustodyVault, Vec<CustodyEvent>) {
    CustodyVault::open(owner(), heir(), deposit, T0).unwrap()
}

// ============================================================================
// Deployment
// ============================================================================

#[test]
fn deployment_sets_owner_heir_balance_and_clock() {
    let (vault, _) = deploy(100);

    assert_eq!(vault.owner(), owner());
    assert_eq!(vault.heir(), heir());
    assert_eq!(vault.balance(), 100);
    assert_eq!(vault.last_activity(), T0);
}

#[test]
fn deployment_emits_transfer_then_heir_update() {
    let (_, events) = deploy(100);

    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0],
        CustodyEvent::OwnershipTransferred {
            previous_owner: Address::ZERO,
            new_owner: owner(),
        }
    );
    assert_eq!(
        events[1],
        CustodyEvent::HeirUpdated {
            previous_heir: Address::ZERO,
            new_heir: heir(),
        }
    );
}

#[test]
fn deployment_with_zero_heir_fails_atomically() {
    let result = CustodyVault::open(owner(), Address::ZERO, 100, T0);
    assert_eq!(result.unwrap_err(), CustodyError::HeirCannotBeZeroAddress);
}

// ============================================================================
// Withdrawal
// ============================================================================

#[test]
fn withdrawal_by_non_owner_is_rejected() {
    let (mut vault, _) = deploy(100);

    let err = vault.withdraw(heir(), 1, T0 + 1).unwrap_err();
    assert_eq!(err, CustodyError::OnlyOwnerCanCall);
    assert_eq!(vault.balance(), 100);
}

#[test]
fn withdrawal_over_balance_is_rejected() {
    let (mut vault, _) = deploy(100);

    let err = vault.withdraw(owner(), 101, T0 + 1).unwrap_err();
    assert!(matches!(err, CustodyError::NotEnoughBalance { .. }));
    assert_eq!(vault.balance(), 100);
}

#[test]
fn withdrawing_the_whole_balance_empties_the_pool() {
    let (mut vault, _) = deploy(100);

    let events = vault.withdraw(owner(), 100, T0 + 1).unwrap();
    assert_eq!(vault.balance(), 0);
    assert_eq!(
        events,
        vec![CustodyEvent::Withdrawal {
            by: owner(),
            amount: 100,
        }]
    );
}

#[test]
fn zero_amount_withdrawal_still_counts_as_activity() {
    let (mut vault, _) = deploy(0);

    let events = vault.withdraw(owner(), 0, T0 + 500).unwrap();
    assert_eq!(vault.balance(), 0);
    assert_eq!(vault.last_activity(), T0 + 500);
    assert_eq!(
        events,
        vec![CustodyEvent::Withdrawal {
            by: owner(),
            amount: 0,
        }]
    );
}

#[test]
fn withdrawal_resets_the_succession_clock() {
    let (mut vault, _) = deploy(100);

    // 29 days in, the owner checks in
    let checkin = T0 + 29 * 86_400;
    vault.withdraw(owner(), 0, checkin).unwrap();

    // The old deadline passes, but the claim is still locked
    let old_deadline = T0 + TIMELOCK_WINDOW_SECS;
    let err = vault
        .claim_ownership(heir(), new_heir(), old_deadline)
        .unwrap_err();
    assert!(matches!(err, CustodyError::NotEnoughTimePassed { .. }));

    // A full window after the check-in, it unlocks
    vault
        .claim_ownership(heir(), new_heir(), checkin + TIMELOCK_WINDOW_SECS)
        .unwrap();
}

// ============================================================================
// Heir updates
// ============================================================================

#[test]
fn owner_can_update_heir() {
    let (mut vault, _) = deploy(100);

    let events = vault.update_heir(owner(), new_heir()).unwrap();
    assert_eq!(vault.heir(), new_heir());
    assert_eq!(
        events,
        vec![CustodyEvent::HeirUpdated {
            previous_heir: heir(),
            new_heir: new_heir(),
        }]
    );
}

#[test]
fn heir_update_is_not_qualifying_activity() {
    let (mut vault, _) = deploy(100);

    vault.update_heir(owner(), new_heir()).unwrap();
    assert_eq!(vault.last_activity(), T0);

    // The window still opens relative to construction time
    vault
        .claim_ownership(new_heir(), heir(), T0 + TIMELOCK_WINDOW_SECS)
        .unwrap();
}

#[test]
fn heir_cannot_be_updated_to_zero() {
    let (mut vault, _) = deploy(100);

    let err = vault.update_heir(owner(), Address::ZERO).unwrap_err();
    assert_eq!(err, CustodyError::HeirCannotBeZeroAddress);
    assert_eq!(vault.heir(), heir());
}

// ============================================================================
// Claim ownership
// ============================================================================

#[test]
fn claim_by_non_heir_is_rejected() {
    let (mut vault, _) = deploy(100);

    let err = vault
        .claim_ownership(owner(), new_heir(), T0 + TIMELOCK_WINDOW_SECS)
        .unwrap_err();
    assert_eq!(err, CustodyError::OnlyHeirCanCall);
}

#[test]
fn claim_before_window_is_rejected() {
    let (mut vault, _) = deploy(100);

    let err = vault.claim_ownership(heir(), new_heir(), T0 + 1).unwrap_err();
    assert!(matches!(err, CustodyError::NotEnoughTimePassed { .. }));
}

#[test]
fn claim_with_zero_new_heir_is_rejected() {
    let (mut vault, _) = deploy(100);

    let err = vault
        .claim_ownership(heir(), Address::ZERO, T0 + TIMELOCK_WINDOW_SECS)
        .unwrap_err();
    assert_eq!(err, CustodyError::HeirCannotBeZeroAddress);
}

#[test]
fn claim_after_window_transfers_ownership() {
    let (mut vault, _) = deploy(100);
    let when = T0 + TIMELOCK_WINDOW_SECS;

    let events = vault.claim_ownership(heir(), new_heir(), when).unwrap();

    assert_eq!(vault.owner(), heir());
    assert_eq!(vault.heir(), new_heir());
    assert_eq!(
        events,
        vec![
            CustodyEvent::OwnershipTransferred {
                previous_owner: owner(),
                new_owner: heir(),
            },
            CustodyEvent::HeirUpdated {
                previous_heir: heir(),
                new_heir: new_heir(),
            },
        ]
    );
    // The pool travels with the vault, untouched
    assert_eq!(vault.balance(), 100);
}

#[test]
fn claim_does_not_rearm_the_window() {
    let (mut vault, _) = deploy(100);
    let when = T0 + TIMELOCK_WINDOW_SECS;

    vault.claim_ownership(heir(), new_heir(), when).unwrap();

    // The former heir lost the claim right
    let err = vault
        .claim_ownership(heir(), new_heir(), when)
        .unwrap_err();
    assert_eq!(err, CustodyError::OnlyHeirCanCall);

    // The clock was not reset by the claim, so the freshly designated
    // heir could claim right away — until the new owner checks in.
    assert_eq!(vault.last_activity(), T0);
    vault.withdraw(heir(), 0, when).unwrap();

    let err = vault
        .claim_ownership(new_heir(), owner(), when)
        .unwrap_err();
    assert!(matches!(err, CustodyError::NotEnoughTimePassed { .. }));
}

// ============================================================================
// Full lifecycle walk
// ============================================================================

#[test]
fn generational_handoff() {
    let (mut vault, _) = deploy(1_000);

    // Generation 1: the owner lives, withdraws, designates a new heir
    vault.withdraw(owner(), 250, T0 + 10).unwrap();
    vault.update_heir(owner(), heir()).unwrap();
    vault.deposit(50);
    assert_eq!(vault.balance(), 800);

    // The owner goes silent; the heir waits out the window and claims
    let t_claim = T0 + 10 + TIMELOCK_WINDOW_SECS;
    vault.claim_ownership(heir(), new_heir(), t_claim).unwrap();
    assert_eq!(vault.owner(), heir());

    // Generation 2: the new owner immediately checks in, then spends
    vault.withdraw(heir(), 0, t_claim).unwrap();
    vault.withdraw(heir(), 800, t_claim + 60).unwrap();
    assert_eq!(vault.balance(), 0);

    // Generation 2 goes silent in turn
    let t_claim2 = t_claim + 60 + TIMELOCK_WINDOW_SECS;
    vault.claim_ownership(new_heir(), owner(), t_claim2).unwrap();
    assert_eq!(vault.owner(), new_heir());
    assert_eq!(vault.heir(), owner());
}
