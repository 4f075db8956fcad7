use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{FeedError, Result};
use crate::types::Issue;

#[async_trait]
pub trait IssueFeed: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;
    async fn list_issues(&self) -> Result<Vec<Issue>>;
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        FeedError::Request(err.to_string())
    }
}

/// Accepted feed layouts: a bare array, or an object wrapping one
#[derive(Deserialize)]
#[serde(untagged)]
enum FeedDocument {
    Bare(Vec<Issue>),
    Wrapped { issues: Vec<Issue> },
}

pub fn parse_feed(data: &str) -> Result<Vec<Issue>> {
    match serde_json::from_str::<FeedDocument>(data)? {
        FeedDocument::Bare(issues) | FeedDocument::Wrapped { issues } => Ok(issues),
    }
}

/// Pick a feed implementation for a `--feed` / `feed.url` value
pub fn from_source(source: &str, timeout: Duration) -> Result<Arc<dyn IssueFeed>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        Ok(Arc::new(HttpFeed::new(source, timeout)?))
    } else {
        Ok(Arc::new(FileFeed::new(source)))
    }
}

pub struct HttpFeed {
    client: reqwest::Client,
    url: String,
}

impl std::fmt::Debug for HttpFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFeed")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl HttpFeed {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("issuefeed/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl IssueFeed for HttpFeed {
    fn name(&self) -> &str {
        "http"
    }

    async fn list_issues(&self) -> Result<Vec<Issue>> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_feed(&body)
    }
}

#[derive(Debug)]
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl IssueFeed for FileFeed {
    fn name(&self) -> &str {
        "file"
    }

    async fn list_issues(&self) -> Result<Vec<Issue>> {
        let data = tokio::fs::read_to_string(&self.path).await?;
        parse_feed(&data)
    }
}
