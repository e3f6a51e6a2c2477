//! Heirloom Server — headless daemon for 24/7 custody monitoring
//!
//! Instantiates the custody vault from configured parameters and keeps an
//! eye on the dead-man time-lock, logging as the succession window
//! approaches. Designed for Docker / server deployment.
//!
//! # Usage
//!
//! ```bash
//! heirloom-server --config /path/to/heirloom-server.toml
//! heirloom-server --check    # Run one check cycle and exit
//! heirloom-server --validate # Validate config and exit
//! ```

mod config;
mod daemon;

use anyhow::{Context, Result};
use std::path::PathBuf;

fn main() -> Result<()> {
    // Parse CLI args (minimal — no clap dependency needed)
    let args: Vec<String> = std::env::args().collect();

    let mut config_path = PathBuf::from("/config/heirloom-server.toml");
    let mut one_shot = false;
    let mut validate_only = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                if i < args.len() {
                    config_path = PathBuf::from(&args[i]);
                } else {
                    anyhow::bail!("--config requires a path argument");
                }
            }
            "--check" | "--once" => {
                one_shot = true;
            }
            "--validate" => {
                validate_only = true;
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--version" | "-V" => {
                println!("heirloom-server {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            other => {
                anyhow::bail!("Unknown argument: {}", other);
            }
        }
        i += 1;
    }

    // Load config
    let mut server_config = config::ServerConfig::from_file(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    // Apply env overrides
    server_config.apply_env_overrides();

    // Validate
    server_config
        .validate()
        .context("Configuration validation failed")?;

    // Init logger
    std::env::set_var("RUST_LOG", &server_config.server.log_level);
    env_logger::init();

    if validate_only {
        println!("✅ Configuration is valid.");
        println!("  Owner:          {}", server_config.vault.owner);
        println!("  Heir:           {}", server_config.vault.heir);
        println!(
            "  Initial deposit: {}",
            server_config.vault.initial_deposit
        );
        println!(
            "  Check interval:  {} secs",
            server_config.server.check_interval_secs
        );
        println!(
            "  Data dir:        {}",
            server_config.server.data_dir.display()
        );
        return Ok(());
    }

    // Build tokio runtime
    let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;

    if one_shot {
        log::info!("Running single check cycle…");
        rt.block_on(daemon::run_check_cycle(&server_config))?;
        log::info!("Done.");
    } else {
        // Install Ctrl-C handler for graceful shutdown
        let shutdown = rt.block_on(async {
            tokio::select! {
                result = daemon::run(server_config) => result,
                _ = tokio::signal::ctrl_c() => {
                    log::info!("Received shutdown signal. Exiting…");
                    Ok(())
                }
            }
        });

        if let Err(e) = shutdown {
            log::error!("Server error: {:#}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"Heirloom Server — headless custody monitoring daemon

USAGE:
    heirloom-server [OPTIONS]

OPTIONS:
    -c, --config <PATH>   Config file path (default: /config/heirloom-server.toml)
    --check, --once       Run a single check cycle and exit
    --validate            Validate config file and exit
    -h, --help            Show this help message
    -V, --version         Show version

ENVIRONMENT VARIABLES (override config file):
    HEIRLOOM_DATA_DIR         Data directory path
    HEIRLOOM_CHECK_INTERVAL   Check interval in seconds
    HEIRLOOM_LOG_LEVEL        Log level (error/warn/info/debug/trace)
    HEIRLOOM_OWNER            Owner identity (0x-prefixed hex)
    HEIRLOOM_INITIAL_HEIR     Initial heir identity (0x-prefixed hex)
    HEIRLOOM_INITIAL_DEPOSIT  Initial deposit in the smallest value unit

EXAMPLES:
    # Run as daemon with config file
    heirloom-server --config /path/to/config.toml

    # Single check (useful for cron jobs)
    heirloom-server --config config.toml --check

    # Validate configuration
    heirloom-server --config config.toml --validate
"#
    );
}
