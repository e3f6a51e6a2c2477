//! The custody state machine
//!
//! Pure logic — no I/O, no clock lookups. The caller identity and the
//! current time arrive as explicit parameters, so every transition is
//! deterministic and independently testable. Each operation validates all
//! of its preconditions before the first mutation and returns the ordered
//! events it emitted, or a rejection with no state change.
//!
//! # State
//!
//! ```text
//! (owner, heir, balance, last_activity)
//!    withdraw      — self-loop: balance -= amount, clock reset
//!    update_heir   — self-loop: heir replaced, clock untouched
//!    claim         — owner <- heir, heir <- new_heir, clock untouched
//! ```
//!
//! Only construction and withdrawal (including zero-amount check-ins)
//! reset the inactivity clock. A claim inherits the expired clock, so the
//! new owner must withdraw before the next succession window re-arms.

use crate::address::Address;
use crate::events::CustodyEvent;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How long the owner may stay inactive before the heir can claim (30 days)
pub const TIMELOCK_WINDOW_SECS: u64 = 30 * 24 * 60 * 60;

/// Rejections from vault operations. Every rejection leaves state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CustodyError {
    #[error("Only the owner can call this operation")]
    OnlyOwnerCanCall,

    #[error("Only the heir can call this operation")]
    OnlyHeirCanCall,

    #[error("Heir cannot be the zero address")]
    HeirCannotBeZeroAddress,

    #[error("Not enough balance: requested {requested}, available {available}")]
    NotEnoughBalance { requested: u128, available: u128 },

    #[error("Not enough time passed: unlocks at {unlock_at}, now {now}")]
    NotEnoughTimePassed { unlock_at: u64, now: u64 },
}

/// The custody tuple: one pool, one owner, one heir, one clock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodyVault {
    owner: Address,
    heir: Address,
    /// Pool balance in the smallest value unit
    balance: u128,
    /// Unix timestamp of the last qualifying owner action
    last_activity: u64,
}

impl CustodyVault {
    /// Construct a vault, crediting the caller's initial deposit.
    ///
    /// The caller becomes the owner. Emits the construction
    /// `OwnershipTransferred` and `HeirUpdated` events (from the null
    /// identity), in that order.
    ///
    /// Rejects with `HeirCannotBeZeroAddress` if `initial_heir` is null —
    /// no vault comes into existence in that case.
    pub fn open(
        owner: Address,
        initial_heir: Address,
        initial_deposit: u128,
        now: u64,
    ) -> Result<(Self, Vec<CustodyEvent>), CustodyError> {
        if initial_heir.is_zero() {
            return Err(CustodyError::HeirCannotBeZeroAddress);
        }

        let vault = CustodyVault {
            owner,
            heir: initial_heir,
            balance: initial_deposit,
            last_activity: now,
        };

        let events = vec![
            CustodyEvent::OwnershipTransferred {
                previous_owner: Address::ZERO,
                new_owner: owner,
            },
            CustodyEvent::HeirUpdated {
                previous_heir: Address::ZERO,
                new_heir: initial_heir,
            },
        ];

        Ok((vault, events))
    }

    /// Withdraw `amount` to the owner and reset the inactivity clock.
    ///
    /// A zero-amount withdrawal is valid and still resets the clock — it is
    /// the owner's cheap "I'm still here" heartbeat.
    pub fn withdraw(
        &mut self,
        caller: Address,
        amount: u128,
        now: u64,
    ) -> Result<Vec<CustodyEvent>, CustodyError> {
        if caller != self.owner {
            return Err(CustodyError::OnlyOwnerCanCall);
        }
        if amount > self.balance {
            return Err(CustodyError::NotEnoughBalance {
                requested: amount,
                available: self.balance,
            });
        }

        self.balance -= amount;
        // Clamp so last_activity never goes backwards on a misbehaving clock
        self.last_activity = self.last_activity.max(now);

        Ok(vec![CustodyEvent::Withdrawal {
            by: self.owner,
            amount,
        }])
    }

    /// Replace the heir. Not a qualifying activity — the clock is untouched.
    pub fn update_heir(
        &mut self,
        caller: Address,
        new_heir: Address,
    ) -> Result<Vec<CustodyEvent>, CustodyError> {
        if caller != self.owner {
            return Err(CustodyError::OnlyOwnerCanCall);
        }
        if new_heir.is_zero() {
            return Err(CustodyError::HeirCannotBeZeroAddress);
        }

        let previous_heir = self.heir;
        self.heir = new_heir;

        Ok(vec![CustodyEvent::HeirUpdated {
            previous_heir,
            new_heir,
        }])
    }

    /// The heir claims ownership after the time-lock has expired.
    ///
    /// Guards, checked in order: caller must be the heir; the window must
    /// have elapsed (`now >= last_activity + TIMELOCK_WINDOW_SECS`); the
    /// replacement heir must not be null.
    ///
    /// The clock is NOT reset: the new owner inherits the expired window
    /// and must withdraw (even zero) before succession re-arms, otherwise
    /// the freshly designated heir could immediately re-claim.
    pub fn claim_ownership(
        &mut self,
        caller: Address,
        new_heir: Address,
        now: u64,
    ) -> Result<Vec<CustodyEvent>, CustodyError> {
        if caller != self.heir {
            return Err(CustodyError::OnlyHeirCanCall);
        }
        let unlock_at = self.last_activity.saturating_add(TIMELOCK_WINDOW_SECS);
        if now < unlock_at {
            return Err(CustodyError::NotEnoughTimePassed { unlock_at, now });
        }
        if new_heir.is_zero() {
            return Err(CustodyError::HeirCannotBeZeroAddress);
        }

        let previous_owner = self.owner;
        let previous_heir = self.heir;
        self.owner = previous_heir;
        self.heir = new_heir;

        Ok(vec![
            CustodyEvent::OwnershipTransferred {
                previous_owner,
                new_owner: self.owner,
            },
            CustodyEvent::HeirUpdated {
                previous_heir,
                new_heir,
            },
        ])
    }

    /// Credit an external deposit. Unconditional — deposits have no
    /// precondition and never touch the clock.
    pub fn deposit(&mut self, amount: u128) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Current owner identity
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Current heir identity
    pub fn heir(&self) -> Address {
        self.heir
    }

    /// Current pool balance
    pub fn balance(&self) -> u128 {
        self.balance
    }

    /// Timestamp of the last qualifying owner action
    pub fn last_activity(&self) -> u64 {
        self.last_activity
    }

    /// When the heir's claim unlocks
    pub fn unlock_at(&self) -> u64 {
        self.last_activity.saturating_add(TIMELOCK_WINDOW_SECS)
    }
}
