//! geecache - An in-memory LRU cache with a byte budget
//!
//! Reads one command per line from stdin and writes one JSON reply per line
//! to stdout. Logs go to stderr.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geecache::{Config, Session};

/// Main entry point for the geecache command driver.
///
/// # Startup Sequence
/// 1. Load configuration from environment variables
/// 2. Initialize tracing subscriber for logging
/// 3. Create the session and its cache
/// 4. Answer commands until stdin closes
fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    // RUST_LOG wins over GEECACHE_LOG when both are set
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!(max_bytes = config.max_bytes, "Starting geecache session");

    let mut session = Session::from_config(&config);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read command from stdin")?;
        if let Some(reply) = session.respond(&line).context("failed to encode reply")? {
            writeln!(stdout, "{}", reply).context("failed to write reply")?;
        }
    }
    stdout.flush().context("failed to flush stdout")?;

    let stats = session.cache().stats();
    info!(
        entries = stats.total_entries,
        used_bytes = stats.used_bytes,
        hits = stats.hits,
        misses = stats.misses,
        evictions = stats.evictions,
        "Session finished"
    );

    Ok(())
}
