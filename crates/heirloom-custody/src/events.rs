//! Custody events emitted by successful vault operations
//!
//! Events are returned from each operation as an ordered list rather than
//! written to a hidden log, so callers decide how to persist or forward them.

use crate::address::Address;
use serde::{Deserialize, Serialize};

/// Events emitted by the custody vault when state changes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CustodyEvent {
    /// Ownership moved, either at construction (from the null identity)
    /// or because the heir claimed an expired vault
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },

    /// The designated heir changed
    HeirUpdated {
        previous_heir: Address,
        new_heir: Address,
    },

    /// The owner withdrew from the pool (zero-amount check-ins included)
    Withdrawal { by: Address, amount: u128 },
}

impl CustodyEvent {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            CustodyEvent::OwnershipTransferred { .. } => "OwnershipTransferred",
            CustodyEvent::HeirUpdated { .. } => "HeirUpdated",
            CustodyEvent::Withdrawal { .. } => "Withdrawal",
        }
    }

    /// Whether this event resets the inactivity clock
    pub fn is_qualifying_activity(&self) -> bool {
        matches!(self, CustodyEvent::Withdrawal { .. })
    }
}
