// Demo source: serve excerpts from memory instead of a backend
//
// Pages are cut with the same rule the real backend uses: page N of size M
// is the slice [N*M, N*M+M), and anything past the end is an empty page.
// A short artificial delay keeps the loading indicator visible.
//
// Run with: BOOKTOK_DEMO=1 cargo run --release
// or point BOOKTOK_DEMO_DATA at a file produced by `booktok chunk`.

use super::model::Excerpt;
use super::source::FetchError;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Built-in catalog used when no data file is configured
const SAMPLE_TEXTS: &[&str] = &[
    "A cell is the smallest unit that can carry out all the processes of life. \
     Every organism, from a single bacterium to a blue whale, is built from them.",
    "Energy is neither created nor destroyed in an isolated system; it only changes form. \
     The sugar in an apple becomes the motion of the hand that reaches for the next one.",
    "Supply and demand meet at a price. When that price is held artificially low, \
     the line at the counter grows longer than the shelf behind it.",
    "The mitochondrion converts the chemical energy of food into ATP, a molecule \
     the rest of the cell spends like small change.",
    "A hypothesis must be falsifiable. If no observation could ever prove it wrong, \
     it is not yet a scientific statement.",
    "Plate tectonics explains why the coastlines of South America and Africa seem \
     to fit together: they once did.",
    "In a market with many sellers offering identical goods, no single seller can \
     raise the price without losing its customers.",
    "Photosynthesis captures light in chlorophyll and stores it in the bonds of glucose, \
     releasing oxygen as a by-product.",
    "An algorithm is a finite sequence of well-defined steps. A recipe qualifies; \
     \"cook until it looks right\" does not.",
    "Natural selection does not plan ahead. It favors what works now, in this \
     environment, for this generation.",
    "Opportunity cost is the value of the best alternative you gave up. \
     The hour spent reading this could have been spent sleeping.",
    "Water expands when it freezes, which is why ice floats and why lakes freeze \
     from the top down, sheltering the life beneath.",
];

/// In-process excerpt catalog with backend paging semantics
#[derive(Debug, Clone)]
pub struct DemoSource {
    catalog: Arc<Vec<Excerpt>>,
    latency: Duration,
}

impl DemoSource {
    pub fn new(catalog: Vec<Excerpt>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            latency: Duration::ZERO,
        }
    }

    /// The built-in sample catalog, ids numbered from 1
    pub fn builtin() -> Self {
        Self::new(
            SAMPLE_TEXTS
                .iter()
                .zip(1..)
                .map(|(text, id)| Excerpt::new(id, *text))
                .collect(),
        )
    }

    /// Load a catalog from a JSON array of excerpts (the `chunk` output format)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read demo data {}", path.display()))?;
        let catalog: Vec<Excerpt> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse demo data {}", path.display()))?;
        Ok(Self::new(catalog))
    }

    /// Simulated network delay applied to every page
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Slice out one page. An empty catalog answers 503 like a backend
    /// that failed to load its data.
    pub fn page(&self, page: u32, size: u32) -> Result<Vec<Excerpt>, FetchError> {
        if self.is_empty() {
            return Err(FetchError::Status(503));
        }

        let size = size as usize;
        let start = (page as usize).saturating_mul(size);
        if start >= self.catalog.len() {
            return Ok(Vec::new());
        }
        let end = start.saturating_add(size).min(self.catalog.len());
        Ok(self.catalog[start..end].to_vec())
    }

    pub async fn fetch_page(&self, page: u32, size: u32) -> Result<Vec<Excerpt>, FetchError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.page(page, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_are_unique_and_start_at_one() {
        let demo = DemoSource::builtin();
        let ids: Vec<i64> = demo.catalog.iter().map(|e| e.id).collect();
        assert_eq!(ids.first(), Some(&1));
        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(ids, deduped);
    }

    #[test]
    fn test_paging_rule() {
        let demo = DemoSource::new((1..=7).map(|id| Excerpt::new(id, "t")).collect());

        assert_eq!(demo.page(0, 5).unwrap().len(), 5);
        let tail: Vec<i64> = demo.page(1, 5).unwrap().iter().map(|e| e.id).collect();
        assert_eq!(tail, vec![6, 7]);
        assert!(demo.page(2, 5).unwrap().is_empty());
        assert!(demo.page(u32::MAX, u32::MAX).unwrap().is_empty());
    }

    #[test]
    fn test_empty_catalog_is_unavailable() {
        let demo = DemoSource::new(Vec::new());
        assert!(demo.is_empty());
        assert_eq!(demo.page(0, 5), Err(FetchError::Status(503)));
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("booktok-demo-{}.json", std::process::id()));
        std::fs::write(&path, r#"[{"id": 10, "text": "ten"}]"#).unwrap();

        let demo = DemoSource::from_file(&path).unwrap();
        assert_eq!(demo.page(0, 5).unwrap(), vec![Excerpt::new(10, "ten")]);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_fetch_page_with_latency() {
        let demo = DemoSource::builtin().with_latency(Duration::from_millis(5));
        let page = demo.fetch_page(0, 3).await.unwrap();
        assert_eq!(page.len(), 3);
    }
}
