use std::sync::Arc;

use crate::issue::IssueController;
use crate::theme::Theme;
use crate::types::Issue;

/// Builds the detail controller shown when an issue is selected
pub trait IssueControllerProvider: Send + Sync + std::fmt::Debug {
    fn provide_instance(&self, issue: Arc<Issue>) -> Arc<IssueController>;
}

#[derive(Debug)]
pub struct ThemedControllerProvider {
    theme: Arc<dyn Theme>,
}

impl ThemedControllerProvider {
    pub fn new(theme: Arc<dyn Theme>) -> Self {
        Self { theme }
    }
}

impl IssueControllerProvider for ThemedControllerProvider {
    fn provide_instance(&self, issue: Arc<Issue>) -> Arc<IssueController> {
        Arc::new(IssueController::new(issue, Arc::clone(&self.theme)))
    }
}
