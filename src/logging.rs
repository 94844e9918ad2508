//! File-based logging. The TUI draws on the terminal, so log output goes
//! to `~/.local/share/pizzabot/logs/` instead. Level is controlled by the
//! `PIZZABOT_LOG` environment variable (defaults to info).

use std::path::PathBuf;

use anyhow::Result;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "pizzabot.log");

    let env_filter = EnvFilter::try_from_env("PIZZABOT_LOG")
        .unwrap_or_else(|_| EnvFilter::new("pizzabot=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::info!("pizzabot starting, logs in {}", log_dir.display());
    Ok(())
}

fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pizzabot")
        .join("logs")
}
