// BookTok - a TikTok-style feed for reading book excerpts
//
// Pages of excerpts are fetched from a backend (or an in-process demo
// catalog) and shown one card at a time in the terminal. Scrolling near the
// end of what is loaded pulls in the next page.
//
// Architecture:
// - Feed (feed): excerpt model, sources, the pager state machine, likes
// - TUI (ratatui): cards, modals, and the event loop that runs fetches
// - CLI (clap): config management, headless dump, catalog chunking

mod chunk;
mod cli;
mod config;
mod feed;
mod logging;
mod tui;
mod util;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, LogRotation, LoggingConfig};
use feed::{DemoSource, ExcerptSource, HttpSource};
use logging::{LogBuffer, TuiLogLayer};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Commands that need neither the feed nor tracing
    match &cli.command {
        Some(Commands::Config { show, reset, path }) => {
            cli::handle_config(*show, *reset, *path);
            return Ok(());
        }
        Some(Commands::Chunk {
            input,
            output,
            words,
        }) => return cli::handle_chunk(input, output, *words),
        _ => {}
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            e.report();
            std::process::exit(1);
        }
    };

    let tui_mode = cli.command.is_none();
    let log_buffer = LogBuffer::new();

    // The guard must live until exit so buffered file logs flush
    let _file_guard = init_tracing(&config.logging, tui_mode, &log_buffer);

    let source = build_source(&config)?;
    tracing::info!(
        source = %source.describe(),
        page_size = config.page_size,
        "BookTok v{} starting",
        config::VERSION
    );

    match cli.command {
        Some(Commands::Dump { pages }) => {
            let mut stdout = std::io::stdout();
            cli::run_dump(&source, config.page_size, pages, &mut stdout).await?;
            Ok(())
        }
        _ => tui::run_tui(config, source, log_buffer).await,
    }
}

/// Pick the excerpt source: demo catalog when demo mode is on, the HTTP
/// backend otherwise
fn build_source(config: &Config) -> Result<ExcerptSource> {
    if config.demo.enabled {
        let demo = match &config.demo.data {
            Some(path) => DemoSource::from_file(path)?,
            None => DemoSource::builtin(),
        };
        if demo.is_empty() {
            tracing::warn!("Demo catalog is empty; every page will fail");
        }
        let latency = Duration::from_millis(config.demo.latency_ms);
        return Ok(ExcerptSource::Demo(demo.with_latency(latency)));
    }
    Ok(ExcerptSource::Http(HttpSource::new(config.api_url.as_str())?))
}

/// Initialize tracing with conditional output
///
/// In TUI mode logs go to the in-memory buffer (prevents garbling the
/// display); otherwise to stderr so `dump` keeps stdout clean. File logging
/// optionally writes JSON to rotating files in addition.
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_tracing(
    logging: &LoggingConfig,
    tui_mode: bool,
    log_buffer: &LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_filter = format!("booktok={}", logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (file_layer, guard) = match file_writer(logging) {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    let console_layer = if tui_mode {
        TuiLogLayer::new(log_buffer.clone()).boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

/// Rolling non-blocking file writer, when file logging is enabled and the
/// directory is usable
fn file_writer(
    logging: &LoggingConfig,
) -> Option<(
    tracing_appender::non_blocking::NonBlocking,
    tracing_appender::non_blocking::WorkerGuard,
)> {
    if !logging.file_enabled {
        return None;
    }
    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            logging.file_dir, e
        );
        return None;
    }

    let appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
        }
    };
    Some(tracing_appender::non_blocking(appender))
}
