//! Feed-side settings: demo catalog and sentinel observer tuning

use crate::tui::observer::{DEFAULT_LOOKAHEAD_ROWS, DEFAULT_THRESHOLD};
use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Demo Source
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Serve excerpts from memory instead of the backend
    pub enabled: bool,
    /// JSON catalog to serve (built-in samples when unset)
    pub data: Option<PathBuf>,
    /// Simulated delay per page
    pub latency_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            data: None,
            latency_ms: 350,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileDemo {
    pub data: Option<String>,
    pub latency_ms: Option<u64>,
}

impl DemoConfig {
    /// `enabled` is a runtime flag and never comes from the file
    pub fn from_file(file: Option<FileDemo>, enabled: bool, data_override: Option<String>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            enabled,
            data: data_override.or(file.data).map(PathBuf::from),
            latency_ms: file.latency_ms.unwrap_or(defaults.latency_ms),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sentinel Observer
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ObserverConfig {
    /// Fraction of the sentinel that must be visible (0.0 - 1.0)
    pub threshold: f32,
    /// Rows of lookahead past the viewport edges
    pub lookahead_rows: u16,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            lookahead_rows: DEFAULT_LOOKAHEAD_ROWS,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileObserver {
    pub threshold: Option<f32>,
    pub lookahead_rows: Option<u16>,
}

impl ObserverConfig {
    pub fn from_file(file: Option<FileObserver>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            threshold: file
                .threshold
                .map(|t| t.clamp(0.0, 1.0))
                .unwrap_or(defaults.threshold),
            lookahead_rows: file.lookahead_rows.unwrap_or(defaults.lookahead_rows),
        }
    }
}
