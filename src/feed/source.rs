//! Excerpt sources - where pages come from
//!
//! The pager never talks to the network itself. It hands out a
//! [`PageRequest`](super::pager::PageRequest) and whoever owns a source
//! performs the fetch, usually on a spawned tokio task.
//!
//! ```text
//! ExcerptSource
//! ├── Http  - GET {api_url}/api/excerpts?page=N&size=M
//! └── Demo  - in-process catalog with the same paging rule
//! ```

use super::demo::DemoSource;
use super::model::Excerpt;
use super::pager::PageRequest;
use std::fmt;

/// Errors that can occur while fetching a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection refused, DNS failure, reset mid-body, ...
    Network(String),
    /// Backend answered with a non-2xx status
    Status(u16),
    /// 2xx answer whose body is not a JSON array of excerpts
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Status(code) => write!(f, "Error: {}", code),
            Self::Decode(msg) => write!(f, "Failed to parse response: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// HTTP backend serving `GET /api/excerpts?page=&size=`
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    /// Create a source for the given backend origin (e.g. `http://localhost:8001`)
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("booktok/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Full URL of the excerpts endpoint (without query)
    pub fn endpoint(&self) -> String {
        format!("{}/api/excerpts", self.base_url.trim_end_matches('/'))
    }

    pub async fn fetch_page(&self, page: u32, size: u32) -> Result<Vec<Excerpt>, FetchError> {
        let response = self
            .client
            .get(self.endpoint())
            .query(&[("page", page), ("size", size)])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json::<Vec<Excerpt>>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// A cloneable handle to whichever backend the session reads from
#[derive(Debug, Clone)]
pub enum ExcerptSource {
    Http(HttpSource),
    Demo(DemoSource),
}

impl ExcerptSource {
    /// Short label for logs and the title bar
    pub fn describe(&self) -> String {
        match self {
            Self::Http(http) => http.endpoint(),
            Self::Demo(demo) => format!("demo catalog ({} excerpts)", demo.len()),
        }
    }

    pub async fn fetch_page(&self, page: u32, size: u32) -> Result<Vec<Excerpt>, FetchError> {
        match self {
            Self::Http(http) => http.fetch_page(page, size).await,
            Self::Demo(demo) => demo.fetch_page(page, size).await,
        }
    }

    /// Perform the fetch described by a pager request
    pub async fn fetch(&self, request: PageRequest) -> Result<Vec<Excerpt>, FetchError> {
        tracing::debug!(
            page = request.page,
            size = request.size,
            epoch = request.epoch,
            "Fetching excerpts"
        );
        let result = self.fetch_page(request.page, request.size).await;
        match &result {
            Ok(items) => tracing::debug!(page = request.page, count = items.len(), "Page received"),
            Err(e) => tracing::error!(page = request.page, "Error fetching excerpts: {}", e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde::Deserialize;
    use std::sync::{Arc, Mutex};

    #[derive(Deserialize)]
    struct PageQuery {
        page: usize,
        size: usize,
    }

    /// Start a local backend with the standard paging rule, returning its origin
    /// and a log of the (page, size) pairs it was asked for.
    async fn spawn_backend(catalog: Vec<Excerpt>) -> (String, Arc<Mutex<Vec<(usize, usize)>>>) {
        let catalog = Arc::new(catalog);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_handler = seen.clone();

        let app = Router::new().route(
            "/api/excerpts",
            get(move |Query(q): Query<PageQuery>| {
                let catalog = catalog.clone();
                let seen = seen_handler.clone();
                async move {
                    seen.lock().unwrap().push((q.page, q.size));
                    let start = (q.page * q.size).min(catalog.len());
                    let end = (start + q.size).min(catalog.len());
                    Json(catalog[start..end].to_vec())
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), seen)
    }

    fn catalog(n: i64) -> Vec<Excerpt> {
        (1..=n).map(|id| Excerpt::new(id, format!("text {}", id))).collect()
    }

    #[tokio::test]
    async fn test_fetch_sends_page_and_size() {
        let (origin, seen) = spawn_backend(catalog(7)).await;
        let source = HttpSource::new(origin).unwrap();

        let first = source.fetch_page(0, 5).await.unwrap();
        let second = source.fetch_page(1, 5).await.unwrap();
        let third = source.fetch_page(2, 5).await.unwrap();

        assert_eq!(first.len(), 5);
        assert_eq!(second.iter().map(|e| e.id).collect::<Vec<_>>(), vec![6, 7]);
        assert!(third.is_empty());
        assert_eq!(*seen.lock().unwrap(), vec![(0, 5), (1, 5), (2, 5)]);
    }

    #[tokio::test]
    async fn test_trailing_slash_in_origin() {
        let (origin, _) = spawn_backend(catalog(2)).await;
        let source = HttpSource::new(format!("{}/", origin)).unwrap();
        assert_eq!(source.fetch_page(0, 5).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_non_success_status_is_failure() {
        let app = Router::new().route(
            "/api/excerpts",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "Excerpts not loaded") }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let source = HttpSource::new(format!("http://{}", addr)).unwrap();
        assert_eq!(source.fetch_page(0, 5).await, Err(FetchError::Status(503)));
    }

    #[tokio::test]
    async fn test_unexpected_body_is_decode_error() {
        let app = Router::new().route(
            "/api/excerpts",
            get(|| async { Json(serde_json::json!({"excerpts": [], "hasMore": false})) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let source = HttpSource::new(format!("http://{}", addr)).unwrap();
        assert!(matches!(
            source.fetch_page(0, 5).await,
            Err(FetchError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpSource::new(format!("http://{}", addr)).unwrap();
        assert!(matches!(
            source.fetch_page(0, 5).await,
            Err(FetchError::Network(_))
        ));
    }

    #[test]
    fn test_status_display_matches_backend_wording() {
        assert_eq!(FetchError::Status(404).to_string(), "Error: 404");
    }
}
