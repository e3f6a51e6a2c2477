//! The custody service — a vault plus its journal behind one owner.
//!
//! Wraps the pure state machine with the host clock and persistence.
//! Every mutating call takes `&mut self`, so operations execute one at a
//! time with exclusive access to the custody tuple: each call validates,
//! commits, journals and persists as a single step, and a rejection leaves
//! both the vault and the journal untouched.

use crate::address::Address;
use crate::events::CustodyEvent;
use crate::journal::{EventJournal, JournalError};
use crate::vault::{CustodyError, CustodyVault};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Errors from the custody service
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Custody error: {0}")]
    Custody(#[from] CustodyError),

    #[error("Journal error: {0}")]
    Journal(#[from] JournalError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No vault state found at {0}")]
    NotInitialized(PathBuf),
}

/// Configuration for the custody service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Path to the persisted vault state
    pub vault_path: PathBuf,
    /// Path to the persisted event journal
    pub journal_path: PathBuf,
}

impl ServiceConfig {
    /// Conventional file layout under a data directory
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            vault_path: data_dir.join("vault.json"),
            journal_path: data_dir.join("journal.json"),
        }
    }
}

/// One vault, its journal, and the host clock
#[derive(Debug)]
pub struct CustodyService {
    config: ServiceConfig,
    vault: CustodyVault,
    journal: EventJournal,
}

impl CustodyService {
    /// Construct a fresh vault and persist it.
    ///
    /// `owner` is the instantiating identity; the attached `initial_deposit`
    /// becomes the pool balance. The construction events are journaled.
    pub fn open(
        config: ServiceConfig,
        owner: Address,
        initial_heir: Address,
        initial_deposit: u128,
    ) -> Result<(Self, Vec<CustodyEvent>), ServiceError> {
        let now = current_timestamp();
        let (vault, events) = CustodyVault::open(owner, initial_heir, initial_deposit, now)?;

        let mut journal = EventJournal::new();
        journal.append_all(&events, now);

        let service = Self {
            config,
            vault,
            journal,
        };
        service.persist()?;

        log::info!(
            "Vault opened: owner={} heir={} balance={}",
            service.vault.owner(),
            service.vault.heir(),
            service.vault.balance()
        );
        Ok((service, events))
    }

    /// Resume a previously persisted vault.
    pub fn resume(config: ServiceConfig) -> Result<Self, ServiceError> {
        if !config.vault_path.exists() {
            return Err(ServiceError::NotInitialized(config.vault_path.clone()));
        }
        let contents = fs::read_to_string(&config.vault_path)?;
        let vault: CustodyVault = serde_json::from_str(&contents)?;
        let journal = EventJournal::load(&config.journal_path)?;

        log::info!(
            "Vault resumed: owner={} heir={} balance={} last_activity={}",
            vault.owner(),
            vault.heir(),
            vault.balance(),
            vault.last_activity()
        );
        Ok(Self {
            config,
            vault,
            journal,
        })
    }

    /// Withdraw to the owner. Zero-amount check-ins allowed.
    pub fn withdraw(
        &mut self,
        caller: Address,
        amount: u128,
    ) -> Result<Vec<CustodyEvent>, ServiceError> {
        let now = current_timestamp();
        let events = self.vault.withdraw(caller, amount, now)?;
        self.commit(&events, now)?;
        log::info!("Withdrawal: by={} amount={}", caller, amount);
        Ok(events)
    }

    /// Replace the heir.
    pub fn update_heir(
        &mut self,
        caller: Address,
        new_heir: Address,
    ) -> Result<Vec<CustodyEvent>, ServiceError> {
        let now = current_timestamp();
        let events = self.vault.update_heir(caller, new_heir)?;
        self.commit(&events, now)?;
        log::info!("Heir updated: new_heir={}", new_heir);
        Ok(events)
    }

    /// Claim ownership as the heir.
    pub fn claim_ownership(
        &mut self,
        caller: Address,
        new_heir: Address,
    ) -> Result<Vec<CustodyEvent>, ServiceError> {
        let now = current_timestamp();
        let events = self.vault.claim_ownership(caller, new_heir, now)?;
        self.commit(&events, now)?;
        log::warn!(
            "Ownership claimed: new_owner={} new_heir={}",
            self.vault.owner(),
            new_heir
        );
        Ok(events)
    }

    /// Credit an external deposit. Unconditional.
    pub fn deposit(&mut self, amount: u128) -> Result<(), ServiceError> {
        self.vault.deposit(amount);
        self.persist()?;
        log::info!(
            "Deposit: amount={} balance={}",
            amount,
            self.vault.balance()
        );
        Ok(())
    }

    /// The current vault state (for inspection)
    pub fn vault(&self) -> &CustodyVault {
        &self.vault
    }

    /// The event journal (for inspection)
    pub fn journal(&self) -> &EventJournal {
        &self.journal
    }

    /// Journal committed events and persist both files
    fn commit(&mut self, events: &[CustodyEvent], now: u64) -> Result<(), ServiceError> {
        self.journal.append_all(events, now);
        self.persist()
    }

    /// Write vault + journal to disk
    fn persist(&self) -> Result<(), ServiceError> {
        if let Some(parent) = self.config.vault_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.vault)?;
        fs::write(&self.config.vault_path, contents)?;
        self.journal.save(&self.config.journal_path)?;
        Ok(())
    }
}

/// Get current unix timestamp
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
