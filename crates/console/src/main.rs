//! `foundrytrack` -- console front end for the pattern registry.
//!
//! Reads one command per line from stdin (with line editing and history on a
//! terminal) and renders each screen to stdout.
//! Logs go to stderr. State lives only for the life of the process.
//!
//! # Environment variables
//!
//! | Variable                     | Default        | Description                        |
//! |------------------------------|----------------|------------------------------------|
//! | `FOUNDRYTRACK_TODAY`         | system date    | Pin "today" (`YYYY-MM-DD`)         |
//! | `FOUNDRYTRACK_TECHNICIAN`    | `Current User` | Technician on new maintenance logs |
//! | `FOUNDRYTRACK_OUTPUT`        | `text`         | `text` or `json`                   |
//! | `FOUNDRYTRACK_REQUIRE_LOGIN` | `true`         | Gate screens behind sign-in        |
//! | `RUST_LOG`                   | see below      | `tracing` filter                   |

use std::io::{self, IsTerminal};
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use foundrytrack_console::config::ConsoleConfig;
use foundrytrack_console::shell::Shell;
use foundrytrack_core::clock::{Clock, FixedClock, SystemClock};
use foundrytrack_events::EventBus;
use foundrytrack_registry::PatternRegistry;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "foundrytrack_console=info,foundrytrack_registry=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // --- Configuration ---
    let config = ConsoleConfig::from_env().context("Invalid configuration")?;
    tracing::info!(
        today = ?config.today,
        technician = %config.technician,
        output = ?config.output,
        require_login = config.require_login,
        "Loaded console configuration"
    );

    let clock: Arc<dyn Clock> = match config.today {
        Some(today) => Arc::new(FixedClock(today)),
        None => Arc::new(SystemClock),
    };

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());

    // --- Registry ---
    let registry = PatternRegistry::seeded(clock)
        .context("Failed to load seed data")?
        .with_technician(config.technician.clone())
        .with_event_bus(Arc::clone(&event_bus));
    tracing::info!(
        patterns = registry.patterns().len(),
        logs = registry.maintenance_logs().len(),
        today = %registry.today(),
        "Pattern registry ready"
    );

    // --- Shell ---
    let stdin = io::stdin();
    let mut shell = Shell::new(registry, &event_bus, &config, io::stdout());
    if stdin.is_terminal() {
        shell.run_interactive()
    } else {
        shell.run(stdin.lock())
    }
    .context("Console I/O failed")?;

    tracing::info!("Console closed");
    Ok(())
}
