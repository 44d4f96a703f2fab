//! Content loader - fetches the content document once per page build

use chrono::Utc;
use std::path::PathBuf;

use super::ContentDocument;
use crate::error::LoadError;
use crate::helpers::{cache_busted, join_url};
use crate::Folio;

/// Where the content document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// A JSON file on disk
    File(PathBuf),
    /// A JSON document served over HTTP, relative to `base_url`
    Http { base_url: String, path: String },
}

impl ContentSource {
    /// Pick the source configured for a site
    pub fn for_site(folio: &Folio) -> Self {
        match folio.config.content_url.as_deref() {
            Some(base_url) if !base_url.trim().is_empty() => ContentSource::Http {
                base_url: base_url.to_string(),
                path: folio.config.content_path.clone(),
            },
            _ => ContentSource::File(folio.source_dir.join(&folio.config.content_path)),
        }
    }
}

/// Loads the content document
pub struct DataLoader {
    source: ContentSource,
    client: reqwest::Client,
}

impl DataLoader {
    /// Create a new loader for the given source
    pub fn new(source: ContentSource) -> Self {
        Self {
            source,
            client: reqwest::Client::new(),
        }
    }

    pub fn source(&self) -> &ContentSource {
        &self.source
    }

    /// Fetch and parse the document
    ///
    /// HTTP sources get a `t=<millis>` query parameter so every load sees
    /// fresh content. Exactly one request is issued.
    pub async fn load(&self) -> Result<ContentDocument, LoadError> {
        tracing::info!("Starting to load portfolio data...");

        let text = match &self.source {
            ContentSource::File(path) => {
                tracing::debug!("Reading content from {:?}", path);
                tokio::fs::read_to_string(path).await?
            }
            ContentSource::Http { base_url, path } => {
                let url = cache_busted(
                    &join_url(base_url, path),
                    Utc::now().timestamp_millis(),
                );
                tracing::debug!("Fetching content from {}", url);

                let response = self.client.get(&url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Status(status.as_u16()));
                }
                response.text().await?
            }
        };

        let document = ContentDocument::from_json(&text)?;
        tracing::info!(
            "Data loaded successfully: {} skills, {} projects",
            document.skills().len(),
            document.projects().len()
        );

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::get, Router};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, r#"{"projects":[{"title":"A"}]}"#).unwrap();

        let loader = DataLoader::new(ContentSource::File(path));
        let doc = loader.load().await.unwrap();
        assert_eq!(doc.projects()[0].title(), "A");
    }

    #[tokio::test]
    async fn test_missing_file_is_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DataLoader::new(ContentSource::File(dir.path().join("missing.json")));
        let err = loader.load().await.unwrap_err();
        assert!(err.is_fetch());
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = DataLoader::new(ContentSource::File(path))
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[tokio::test]
    async fn test_http_load_is_cache_busted_and_single_request() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let app = Router::new().route(
            "/data/data.json",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    match params.get("t").and_then(|t| t.parse::<i64>().ok()) {
                        Some(_) => (StatusCode::OK, r#"{"hero":{"subtitle":"hello"}}"#),
                        None => (StatusCode::BAD_REQUEST, ""),
                    }
                }
            }),
        );
        let base_url = spawn(app).await;

        let loader = DataLoader::new(ContentSource::Http {
            base_url,
            path: "data/data.json".to_string(),
        });
        let doc = loader.load().await.unwrap();
        assert_eq!(doc.hero.unwrap().subtitle.as_deref(), Some("hello"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let app = Router::new().route(
            "/data/data.json",
            get(|| async { (StatusCode::NOT_FOUND, "gone") }),
        );
        let base_url = spawn(app).await;

        let err = DataLoader::new(ContentSource::Http {
            base_url,
            path: "data/data.json".to_string(),
        })
        .load()
        .await
        .unwrap_err();
        assert!(matches!(err, LoadError::Status(404)));
        assert_eq!(err.to_string(), "HTTP error! status: 404");
    }
}
