// CLI module - command-line argument parsing and handlers
//
// Subcommands besides the default TUI:
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --path: Print the config file location
// - dump: Walk the feed headlessly and print JSON lines
// - chunk: Turn a plain-text book into a demo catalog

use crate::chunk::{self, DEFAULT_WORDS_PER_CHUNK};
use crate::config::{Config, VERSION};
use crate::feed::{Applied, ExcerptSource, Pager};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// BookTok - scroll through book excerpts one card at a time
#[derive(Parser)]
#[command(name = "booktok")]
#[command(version = VERSION)]
#[command(about = "A TikTok-style feed for reading book excerpts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Print every excerpt in the feed as a JSON line
    Dump {
        /// Stop after this many pages
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        pages: Option<u32>,
    },

    /// Split a plain-text file into a JSON excerpt catalog
    Chunk {
        /// Plain-text input file
        input: PathBuf,

        /// Where to write the catalog
        #[arg(short, long, default_value = "excerpts.json")]
        output: PathBuf,

        /// Words per excerpt
        #[arg(long, default_value_t = DEFAULT_WORDS_PER_CHUNK)]
        words: usize,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// config
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_config(show: bool, reset: bool, path: bool) {
    if path {
        handle_config_path();
    } else if show {
        handle_config_show();
    } else if reset {
        handle_config_reset();
    } else {
        println!("Usage: booktok config [--show|--reset|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --path    Show config file path");
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            e.report();
            std::process::exit(1);
        }
    };

    println!("# Effective configuration (env > file > defaults)");
    println!("# demo mode: {}", if config.demo.enabled { "on" } else { "off" });
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = io::stderr().flush();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

// ─────────────────────────────────────────────────────────────────────────────
// dump
// ─────────────────────────────────────────────────────────────────────────────

/// Drive a pager to exhaustion (or `max_pages`), writing each excerpt as one
/// JSON line. A failed page ends the walk with the user-facing message.
pub async fn run_dump(
    source: &ExcerptSource,
    page_size: u32,
    max_pages: Option<u32>,
    out: &mut impl Write,
) -> Result<usize> {
    let mut pager = Pager::new(page_size);
    let mut next = pager.start();
    let mut pages = 0u32;
    let mut written = 0usize;

    while let Some(request) = next {
        if max_pages.is_some_and(|max| pages >= max) {
            break;
        }
        let outcome = source.fetch(request).await;
        match pager.apply(request, outcome) {
            Applied::Loaded { added } => {
                let fresh = &pager.excerpts()[pager.excerpts().len() - added..];
                for excerpt in fresh {
                    serde_json::to_writer(&mut *out, excerpt)?;
                    writeln!(out)?;
                }
                written += added;
                pages += 1;
                tracing::info!(page = request.page, "Dumped {} excerpts", added);
            }
            Applied::Exhausted | Applied::Stale => break,
            Applied::Failed => {
                let message = pager.error().unwrap_or_default().to_string();
                return Err(anyhow!(message));
            }
        }

        next = pager.load_more();
    }

    out.flush()?;
    Ok(written)
}

// ─────────────────────────────────────────────────────────────────────────────
// chunk
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_chunk(input: &Path, output: &Path, words: usize) -> Result<()> {
    let count = chunk::chunk_file(input, output, words)
        .with_context(|| format!("Failed to chunk {}", input.display()))?;
    println!("Wrote {} excerpts to {}", count, output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::pager::LOAD_ERROR_MESSAGE;
    use crate::feed::{DemoSource, Excerpt};
    use std::time::Duration;

    fn demo(count: i64) -> ExcerptSource {
        let catalog = (1..=count)
            .map(|id| Excerpt::new(id, format!("excerpt {}", id)))
            .collect();
        ExcerptSource::Demo(DemoSource::new(catalog).with_latency(Duration::ZERO))
    }

    fn ids(output: &[u8]) -> Vec<i64> {
        String::from_utf8_lossy(output)
            .lines()
            .map(|line| serde_json::from_str::<Excerpt>(line).unwrap().id)
            .collect()
    }

    #[test]
    fn test_cli_parses_chunk_defaults() {
        let cli = Cli::parse_from(["booktok", "chunk", "book.txt"]);
        match cli.command {
            Some(Commands::Chunk {
                input,
                output,
                words,
            }) => {
                assert_eq!(input, PathBuf::from("book.txt"));
                assert_eq!(output, PathBuf::from("excerpts.json"));
                assert_eq!(words, DEFAULT_WORDS_PER_CHUNK);
            }
            _ => panic!("expected chunk"),
        }
    }

    #[tokio::test]
    async fn test_dump_walks_to_exhaustion() {
        let mut out = Vec::new();
        let written = run_dump(&demo(12), 5, None, &mut out).await.unwrap();
        assert_eq!(written, 12);
        assert_eq!(ids(&out), (1..=12).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_dump_respects_page_limit() {
        let mut out = Vec::new();
        let written = run_dump(&demo(12), 5, Some(2), &mut out).await.unwrap();
        assert_eq!(written, 10);
    }

    #[tokio::test]
    async fn test_dump_zero_pages_prints_nothing() {
        let mut out = Vec::new();
        let written = run_dump(&demo(12), 5, Some(0), &mut out).await.unwrap();
        assert_eq!(written, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_cli_rejects_zero_pages() {
        assert!(Cli::try_parse_from(["booktok", "dump", "--pages", "0"]).is_err());
        let cli = Cli::try_parse_from(["booktok", "dump", "--pages", "2"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Dump { pages: Some(2) })));
    }

    #[tokio::test]
    async fn test_dump_fails_with_user_message() {
        let mut out = Vec::new();
        let err = run_dump(&demo(0), 5, None, &mut out).await.unwrap_err();
        assert_eq!(err.to_string(), LOAD_ERROR_MESSAGE);
        assert!(out.is_empty());
    }
}
