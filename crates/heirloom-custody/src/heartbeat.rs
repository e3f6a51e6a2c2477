//! Dead-man heartbeat evaluation for custody vaults.
//!
//! Pure logic — no I/O, no clock lookups. Takes the vault's activity
//! anchor and the current time, returns a recommendation. The caller
//! (server daemon) decides whether to act on it.
//!
//! # How It Works
//!
//! The succession clock is relative to the last qualifying owner action.
//! Every withdrawal resets it. The heartbeat module evaluates how much of
//! the time-lock window has elapsed and recommends action:
//!
//! ```text
//! |--- Healthy ---|--- CheckinRecommended ---|--- CheckinRequired ---|--- Expired
//! 0%             50%                        90%                    100%
//! ```
//!
//! Thresholds are configurable.

use serde::{Deserialize, Serialize};

/// Heartbeat configuration — when to recommend a check-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatConfig {
    /// Fraction of the window elapsed before recommending check-in (0.0–1.0).
    /// Default: 0.5 (halfway point).
    pub checkin_threshold: f64,

    /// Fraction of the window elapsed before check-in is critical (0.0–1.0).
    /// Default: 0.9.
    pub critical_threshold: f64,

    /// How often the caller should re-evaluate (seconds). Advisory — this
    /// module doesn't poll itself. Default: 3600 (1 hour).
    pub poll_interval_secs: u64,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            checkin_threshold: 0.5,
            critical_threshold: 0.9,
            poll_interval_secs: 3600,
        }
    }
}

impl HeartbeatConfig {
    /// Validate that thresholds are sensible.
    pub fn validate(&self) -> Result<(), HeartbeatError> {
        if self.checkin_threshold <= 0.0 || self.checkin_threshold >= 1.0 {
            return Err(HeartbeatError::InvalidThreshold(
                "checkin_threshold must be between 0.0 and 1.0 exclusive".into(),
            ));
        }
        if self.critical_threshold <= self.checkin_threshold || self.critical_threshold >= 1.0 {
            return Err(HeartbeatError::InvalidThreshold(
                "critical_threshold must be between checkin_threshold and 1.0 exclusive".into(),
            ));
        }
        Ok(())
    }
}

/// What the heartbeat recommends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeartbeatAction {
    /// The window is far from expiry. No action needed.
    Healthy,
    /// Passed the check-in threshold. The owner should withdraw soon.
    CheckinRecommended,
    /// Passed the critical threshold. The owner must withdraw now.
    CheckinRequired,
    /// The window expired. The heir can claim. Too late for a check-in
    /// to prevent that, but a withdrawal still re-arms the clock.
    Expired,
}

/// Full heartbeat status for a vault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatStatus {
    /// Fraction of the window elapsed (0.0–1.0+).
    pub elapsed_fraction: f64,
    /// Seconds until the heir's claim unlocks (negative once expired).
    pub secs_remaining: i64,
    /// Recommended action.
    pub action: HeartbeatAction,
}

/// Errors from heartbeat evaluation.
#[derive(Debug, thiserror::Error)]
pub enum HeartbeatError {
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),
}

/// Evaluate the heartbeat status of a custody vault.
///
/// Pure function: takes the activity anchor and current time, returns a
/// recommendation.
///
/// # Arguments
/// * `last_activity` — unix timestamp of the last qualifying owner action
/// * `now` — current unix timestamp
/// * `window_secs` — the time-lock window length
/// * `config` — heartbeat thresholds
pub fn evaluate_heartbeat(
    last_activity: u64,
    now: u64,
    window_secs: u64,
    config: &HeartbeatConfig,
) -> HeartbeatStatus {
    let elapsed = now.saturating_sub(last_activity);
    let elapsed_fraction = if window_secs == 0 {
        1.0 // Degenerate case: zero window is always expired
    } else {
        elapsed as f64 / window_secs as f64
    };

    let unlock_at = last_activity.saturating_add(window_secs);
    let secs_remaining = unlock_at as i64 - now as i64;

    let action = if now >= unlock_at {
        HeartbeatAction::Expired
    } else if elapsed_fraction >= config.critical_threshold {
        HeartbeatAction::CheckinRequired
    } else if elapsed_fraction >= config.checkin_threshold {
        HeartbeatAction::CheckinRecommended
    } else {
        HeartbeatAction::Healthy
    };

    HeartbeatStatus {
        elapsed_fraction,
        secs_remaining,
        action,
    }
}
