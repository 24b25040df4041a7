//! Prepare an excerpt catalog from plain text
//!
//! The text is normalized, split into runs of roughly `words_per_chunk`
//! words and numbered from 1. The output is the same JSON array the backend
//! serves, so it can be fed straight into demo mode.

use crate::feed::Excerpt;
use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;

/// Default words per excerpt
pub const DEFAULT_WORDS_PER_CHUNK: usize = 300;

/// Collapse whitespace and drop everything except word characters,
/// whitespace and basic punctuation (`.,;:!?-`)
pub fn clean_text(text: &str) -> Result<String> {
    let whitespace = Regex::new(r"\s+").context("Invalid whitespace pattern")?;
    let disallowed = Regex::new(r"[^\w\s.,;:!?\-]").context("Invalid character filter")?;

    let collapsed = whitespace.replace_all(text, " ");
    let filtered = disallowed.replace_all(&collapsed, "");
    Ok(filtered.trim().to_string())
}

/// Split text into chunks of `words_per_chunk` words (the last may be shorter)
pub fn split_into_chunks(text: &str, words_per_chunk: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(words_per_chunk.max(1))
        .map(|chunk| chunk.join(" "))
        .collect()
}

/// Clean and split text into excerpts with ids starting at 1
pub fn excerpts_from_text(text: &str, words_per_chunk: usize) -> Result<Vec<Excerpt>> {
    let cleaned = clean_text(text)?;
    Ok(split_into_chunks(&cleaned, words_per_chunk)
        .into_iter()
        .zip(1..)
        .map(|(chunk, id)| Excerpt::new(id, chunk))
        .collect())
}

/// Read `input`, chunk it and write the catalog to `output`. Returns the
/// number of excerpts written.
pub fn chunk_file(input: &Path, output: &Path, words_per_chunk: usize) -> Result<usize> {
    tracing::info!("Extracting text from {}", input.display());
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    tracing::info!("Splitting into ~{} word chunks", words_per_chunk);
    let excerpts = excerpts_from_text(&text, words_per_chunk)?;

    let json = serde_json::to_string_pretty(&excerpts).context("Failed to serialize excerpts")?;
    std::fs::write(output, json).with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!("Saved {} excerpts to {}", excerpts.len(), output.display());
    Ok(excerpts.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        let cleaned = clean_text("  Hello,\n\n  world!  (see §2) — done.\t").unwrap();
        assert_eq!(cleaned, "Hello, world! see 2  done.");
    }

    #[test]
    fn test_clean_text_keeps_hyphens_and_unicode_letters() {
        assert_eq!(clean_text("well-known café").unwrap(), "well-known café");
    }

    #[test]
    fn test_split_respects_word_count() {
        let chunks = split_into_chunks("a b c d e f g", 3);
        assert_eq!(chunks, vec!["a b c", "d e f", "g"]);
    }

    #[test]
    fn test_split_empty_text() {
        assert!(split_into_chunks("   ", 3).is_empty());
    }

    #[test]
    fn test_ids_start_at_one() {
        let excerpts = excerpts_from_text("one two three four five", 2).unwrap();
        let ids: Vec<i64> = excerpts.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(excerpts[2].text, "five");
    }

    #[test]
    fn test_chunk_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("booktok-chunk-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("book.txt");
        let output = dir.join("excerpts.json");
        std::fs::write(&input, "alpha beta gamma delta").unwrap();

        assert_eq!(chunk_file(&input, &output, 3).unwrap(), 2);
        let written: Vec<Excerpt> =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written[0], Excerpt::new(1, "alpha beta gamma"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
