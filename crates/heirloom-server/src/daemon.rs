//! The daemon loop — periodically evaluates the dead-man heartbeat and
//! logs how close the vault is to succession.

use crate::config::ServerConfig;
use anyhow::{Context, Result};
use heirloom_custody::{
    evaluate_heartbeat, CustodyService, HeartbeatAction, ServiceConfig, ServiceError,
    TIMELOCK_WINDOW_SECS,
};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Run the daemon loop. Blocks forever (until shutdown signal).
pub async fn run(config: ServerConfig) -> Result<()> {
    log::info!("Heirloom server starting…");
    log::info!("  Owner:      {}", config.vault.owner);
    log::info!("  Heir:       {}", config.vault.heir);
    log::info!(
        "  Interval:   {} seconds ({:.1} hours)",
        config.server.check_interval_secs,
        config.server.check_interval_secs as f64 / 3600.0
    );
    log::info!("  Data dir:   {}", config.server.data_dir.display());

    // Ensure data directory exists
    std::fs::create_dir_all(&config.server.data_dir).with_context(|| {
        format!(
            "Failed to create data dir: {}",
            config.server.data_dir.display()
        )
    })?;

    let interval = Duration::from_secs(config.server.check_interval_secs);

    // Run first check immediately, then loop
    let mut first = true;
    loop {
        if !first {
            log::info!(
                "Sleeping {} seconds until next check…",
                config.server.check_interval_secs
            );
            tokio::time::sleep(interval).await;
        }
        first = false;

        match run_check_cycle(&config).await {
            Ok(()) => log::info!("Check cycle completed successfully."),
            Err(e) => log::error!("Check cycle failed: {:#}", e),
        }
    }
}

/// Execute a single check cycle: load the vault (creating it on first run),
/// evaluate the heartbeat, and log the recommendation.
pub async fn run_check_cycle(config: &ServerConfig) -> Result<()> {
    log::info!("Starting check cycle…");

    let service = load_or_open(config)?;
    let vault = service.vault();

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let status = evaluate_heartbeat(
        vault.last_activity(),
        now,
        TIMELOCK_WINDOW_SECS,
        &config.heartbeat,
    );

    log::info!(
        "Vault: owner={} heir={} balance={} | journal entries: {}",
        vault.owner(),
        vault.heir(),
        vault.balance(),
        service.journal().len()
    );

    let days_remaining = status.secs_remaining as f64 / 86_400.0;
    match status.action {
        HeartbeatAction::Healthy => {
            log::info!(
                "Heartbeat healthy: {:.0}% of window elapsed, {:.1} days remaining",
                status.elapsed_fraction * 100.0,
                days_remaining
            );
        }
        HeartbeatAction::CheckinRecommended => {
            log::warn!(
                "Check-in recommended: {:.0}% of window elapsed, {:.1} days remaining",
                status.elapsed_fraction * 100.0,
                days_remaining
            );
        }
        HeartbeatAction::CheckinRequired => {
            log::warn!(
                "⚠️  Check-in REQUIRED: {:.0}% of window elapsed, only {:.1} days remaining",
                status.elapsed_fraction * 100.0,
                days_remaining
            );
        }
        HeartbeatAction::Expired => {
            log::error!(
                "Time-lock EXPIRED {:.1} days ago — the heir {} can claim ownership",
                -days_remaining,
                vault.heir()
            );
        }
    }

    Ok(())
}

/// Resume the persisted vault, or open a fresh one from the configured
/// parameters on first run.
fn load_or_open(config: &ServerConfig) -> Result<CustodyService> {
    let service_config = ServiceConfig::in_dir(&config.server.data_dir);

    match CustodyService::resume(service_config.clone()) {
        Ok(service) => Ok(service),
        Err(ServiceError::NotInitialized(_)) => {
            log::info!("No persisted vault found — opening a fresh one.");
            let owner = config.owner()?;
            let heir = config.heir()?;
            let (service, _events) = CustodyService::open(
                service_config,
                owner,
                heir,
                config.vault.initial_deposit as u128,
            )
            .context("Failed to open vault")?;
            Ok(service)
        }
        Err(e) => Err(e).context("Failed to resume vault"),
    }
}
