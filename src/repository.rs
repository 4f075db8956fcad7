use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::action::Action;
use crate::error::{FeedError, Result};
use crate::feed::IssueFeed;
use crate::types::Issue;

/// Asynchronous source of issues for the list screen.
///
/// `fetch_issues` must return promptly. The completion is resolved later,
/// from any thread, at most once.
pub trait IssueRepository: Send + Sync + std::fmt::Debug {
    fn fetch_issues(&self, completion: Completion);
}

/// One-shot handle that delivers a fetch result back to the UI loop.
///
/// Resolving consumes the handle, so a fetch reports either success or
/// failure and never both. Results travel through the action channel and are
/// applied by the loop that owns the screen. A completion dropped without
/// being resolved reports [`FeedError::Abandoned`].
#[derive(Debug)]
#[must_use = "a fetch is only reported once its completion is resolved"]
pub struct Completion {
    tx: Option<mpsc::UnboundedSender<Action>>,
}

impl Completion {
    pub fn new(tx: mpsc::UnboundedSender<Action>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn succeed(mut self, issues: Vec<Arc<Issue>>) {
        self.send(Action::IssuesLoaded(issues));
    }

    pub fn fail(mut self, err: FeedError) {
        self.send(Action::IssuesFailed(err.to_string()));
    }

    pub fn resolve(self, result: Result<Vec<Arc<Issue>>>) {
        match result {
            Ok(issues) => self.succeed(issues),
            Err(e) => self.fail(e),
        }
    }

    fn send(&mut self, action: Action) {
        if let Some(tx) = self.tx.take() {
            tx.send(action).ok();
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if self.tx.is_some() {
            warn!("issue fetch dropped without a result");
            self.send(Action::IssuesFailed(FeedError::Abandoned.to_string()));
        }
    }
}

/// Repository backed by an [`IssueFeed`], fetching on the tokio runtime.
///
/// Fetches are not cancelled or de-duplicated; whichever finishes last wins.
#[derive(Debug)]
pub struct FeedRepository {
    feed: Arc<dyn IssueFeed>,
}

impl FeedRepository {
    pub fn new(feed: Arc<dyn IssueFeed>) -> Self {
        Self { feed }
    }
}

impl IssueRepository for FeedRepository {
    fn fetch_issues(&self, completion: Completion) {
        let feed = Arc::clone(&self.feed);
        tokio::spawn(async move {
            debug!(feed = feed.name(), "fetching issues");
            let result = feed
                .list_issues()
                .await
                .map(|issues| issues.into_iter().map(Arc::new).collect::<Vec<_>>());

            match &result {
                Ok(issues) => debug!(count = issues.len(), "issues fetched"),
                Err(e) => warn!(feed = feed.name(), error = %e, "issue fetch failed"),
            }

            completion.resolve(result);
        });
    }
}
