//! Heirloom Custody Module
//!
//! A dead-man's-switch asset custody state machine: a single owner controls
//! a pool of value and may withdraw from it at will; a designated heir may
//! seize ownership if the owner has been inactive for the time-lock window.
//!
//! # Concepts
//!
//! - **Owner**: can withdraw (any amount, including zero) and replace the heir
//! - **Heir**: can claim ownership once the time-lock expires
//! - **Heartbeat**: a zero-amount withdrawal that resets the clock without
//!   moving funds
//!
//! # Example
//!
//! ```
//! use heirloom_custody::{Address, CustodyVault, TIMELOCK_WINDOW_SECS};
//!
//! let owner: Address = "0x1111111111111111111111111111111111111111".parse().unwrap();
//! let heir: Address = "0x2222222222222222222222222222222222222222".parse().unwrap();
//!
//! let (mut vault, _events) = CustodyVault::open(owner, heir, 100, 1_700_000_000).unwrap();
//!
//! // Owner checks in with a zero-amount withdrawal
//! vault.withdraw(owner, 0, 1_700_000_600).unwrap();
//!
//! // Heir can claim once the window has elapsed
//! let new_heir: Address = "0x3333333333333333333333333333333333333333".parse().unwrap();
//! let when = vault.last_activity() + TIMELOCK_WINDOW_SECS;
//! vault.claim_ownership(heir, new_heir, when).unwrap();
//! assert_eq!(vault.owner(), heir);
//! ```

pub mod address;
pub mod events;
pub mod heartbeat;
pub mod journal;
pub mod service;
pub mod vault;

pub use address::{Address, AddressError};
pub use events::CustodyEvent;
pub use heartbeat::{evaluate_heartbeat, HeartbeatAction, HeartbeatConfig, HeartbeatStatus};
pub use journal::{EventJournal, JournalEntry, JournalError};
pub use service::{CustodyService, ServiceConfig, ServiceError};
pub use vault::{CustodyError, CustodyVault, TIMELOCK_WINDOW_SECS};
