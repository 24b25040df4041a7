//! Favorites export
//!
//! Liked excerpts are written as a pretty-printed JSON array named
//! `booktok-favorites-<YYYY-MM-DD>.json`.

use super::likes::Likes;
use super::model::Excerpt;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Liked excerpts in the order they appear in the feed
pub fn liked_excerpts<'a>(excerpts: &'a [Excerpt], likes: &Likes) -> Vec<&'a Excerpt> {
    excerpts.iter().filter(|e| likes.contains(e.id)).collect()
}

/// Today's date in UTC, so the file name does not depend on the local
/// timezone
pub fn export_date() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// File name for an export made on `date`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("booktok-favorites-{}.json", date.format("%Y-%m-%d"))
}

/// Serialize the liked excerpts with two-space indentation
pub fn render_export(excerpts: &[Excerpt], likes: &Likes) -> Result<String> {
    serde_json::to_string_pretty(&liked_excerpts(excerpts, likes))
        .context("Failed to serialize liked excerpts")
}

/// Write the export into `dir`
///
/// Returns `Ok(None)` without touching the filesystem when nothing is liked.
pub fn write_export(
    dir: &Path,
    excerpts: &[Excerpt],
    likes: &Likes,
    date: NaiveDate,
) -> Result<Option<PathBuf>> {
    if likes.is_empty() {
        return Ok(None);
    }

    let body = render_export(excerpts, likes)?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let path = dir.join(export_file_name(date));
    std::fs::write(&path, body)
        .with_context(|| format!("Failed to write export {}", path.display()))?;

    tracing::info!("Exported liked excerpts to {}", path.display());
    Ok(Some(path))
}
