use std::sync::Arc;

use crate::error::FeedError;
use crate::types::Issue;

#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    Back,
    ScrollUp,
    ScrollDown,
    GoToTop,
    GoToBottom,
    Select,
    Resize(u16, u16),

    // The issues list became visible
    Appear,
    Refresh,

    // Repository completions, marshaled onto the UI loop
    IssuesLoaded(Vec<Arc<Issue>>),
    IssuesFailed(String),

    OpenInBrowser,
    YankUrl,

    Error(String),
    None,
}

impl From<FeedError> for Action {
    fn from(err: FeedError) -> Self {
        Action::Error(err.to_string())
    }
}
