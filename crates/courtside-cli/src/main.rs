// Courtside entry point.
//
// Startup sequence:
// 1. Load config (the log directory comes from it)
// 2. Initialize tracing (log to file, stdout carries the report)
// 3. Build the accolade table and the stats client
// 4. Prompt for two player names
// 5. Compare and print the report

mod prompt;

use std::path::Path;

use anyhow::Context;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::info;

use courtside_core::compare::compare_players;
use courtside_core::config;
use courtside_core::report;
use courtside_nba::NbaStatsClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load config
    let config = config::load_config().context("failed to load configuration")?;

    // 2. Initialize tracing
    init_tracing(&config.log_dir(), &config.logging.filter)?;
    info!(
        "Courtside starting: provider={}, timeout={}s",
        config.provider.base_url, config.provider.timeout_secs
    );

    // 3. Accolades and stats client
    let accolades = config.accolade_table();
    info!("Accolade overrides loaded: {}", config.accolades.len());

    let client = NbaStatsClient::from_config(&config.provider)
        .context("failed to build stats client")?;
    info!("Player index season: {}", client.index_season());

    // 4. Prompt for names
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let (first, second) = prompt::read_names(&mut stdin, &mut stdout).await?;

    // 5. Compare and print
    let outcome = compare_players(&client, &accolades, &first, &second, config.fetch_options())
        .await
        .context("stats provider request failed")?;

    stdout.write_all(report::render(&outcome).as_bytes()).await?;
    stdout.flush().await?;

    info!("Courtside finished");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which shows the report).
fn init_tracing(log_dir: &Path, filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("courtside.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
