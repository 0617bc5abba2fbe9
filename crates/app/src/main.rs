mod args;
mod commands;
mod content;

use services::{AppServices, Clock};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::{Args, ArgsError, Command, print_usage};

fn init_tracing() {
    // Logs go to stderr so `status --json` stays machine-readable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    if parsed.command == Command::Help {
        print_usage();
        return Ok(());
    }

    let catalog = content::load_catalog(parsed.config.content_dir.as_deref())?;
    tracing::debug!(
        lessons = catalog.lessons().len(),
        questions = catalog.questions().len(),
        "content loaded"
    );

    // Open + migrate SQLite at startup; the services never see the file system.
    prepare_sqlite_file(&parsed.config.db_url)?;
    let services =
        AppServices::new_sqlite(&parsed.config.db_url, catalog, Clock::default_clock()).await?;

    commands::run(parsed.command, &services, &parsed.config).await
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        tracing::error!(error = %err, "drivesafe failed");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
