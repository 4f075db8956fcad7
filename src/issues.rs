use std::sync::Arc;

use chrono::{DateTime, Local};
use ratatui::style::Style;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::action::Action;
use crate::navigation::Navigator;
use crate::provider::IssueControllerProvider;
use crate::repository::{Completion, IssueRepository};
use crate::theme::Theme;
use crate::types::{IndexPath, Issue};

const TITLE: &str = "Issues";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Normal,
    Selected,
}

/// Label and per-state text style of the screen's tab
#[derive(Debug, Clone, PartialEq)]
pub struct TabBarItem {
    pub title: String,
    normal: Style,
    selected: Style,
}

impl TabBarItem {
    pub fn title_text_attributes(&self, state: ControlState) -> Style {
        match state {
            ControlState::Normal => self.normal,
            ControlState::Selected => self.selected,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub style: Style,
}

#[derive(Debug, Clone)]
pub struct IssueCell {
    pub title_label: Label,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// The issues list: fetches on every appearance, shows one row per issue and
/// hands selected issues to the detail provider.
pub struct IssuesScreen {
    tab_bar_item: TabBarItem,
    navigation_title: String,
    issues: Vec<Arc<Issue>>,
    selected: usize,
    state: FeedState,
    last_updated: Option<DateTime<Local>>,
    repository: Arc<dyn IssueRepository>,
    provider: Arc<dyn IssueControllerProvider>,
    theme: Arc<dyn Theme>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl IssuesScreen {
    pub fn new(
        repository: Arc<dyn IssueRepository>,
        provider: Arc<dyn IssueControllerProvider>,
        theme: Arc<dyn Theme>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        let tab_style = theme.tab_bar_style();
        Self {
            tab_bar_item: TabBarItem {
                title: TITLE.to_string(),
                normal: tab_style,
                selected: tab_style,
            },
            navigation_title: TITLE.to_uppercase(),
            issues: Vec::new(),
            selected: 0,
            state: FeedState::Idle,
            last_updated: None,
            repository,
            provider,
            theme,
            action_tx,
        }
    }

    pub fn title(&self) -> &str {
        &self.tab_bar_item.title
    }

    pub fn navigation_title(&self) -> &str {
        &self.navigation_title
    }

    pub fn tab_bar_item(&self) -> &TabBarItem {
        &self.tab_bar_item
    }

    pub fn theme(&self) -> &Arc<dyn Theme> {
        &self.theme
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    /// Called each time the list becomes visible
    pub fn view_will_appear(&mut self) {
        debug!(rows = self.issues.len(), "issues screen appearing, fetching");
        self.state = FeedState::Loading;
        self.repository
            .fetch_issues(Completion::new(self.action_tx.clone()));
    }

    pub fn issues_loaded(&mut self, issues: Vec<Arc<Issue>>) {
        debug!(count = issues.len(), "showing issues");
        self.issues = issues;
        self.selected = self.selected.min(self.issues.len().saturating_sub(1));
        self.state = FeedState::Loaded;
        self.last_updated = Some(Local::now());
    }

    /// Keeps whatever rows are showing; the failure is only surfaced as state
    pub fn issues_failed(&mut self, message: String) {
        warn!(error = %message, "could not load issues");
        self.state = FeedState::Failed(message);
    }

    pub fn number_of_sections(&self) -> usize {
        1
    }

    pub fn number_of_rows_in_section(&self, section: usize) -> usize {
        if section == 0 {
            self.issues.len()
        } else {
            0
        }
    }

    fn issue_at(&self, index_path: IndexPath) -> Option<&Arc<Issue>> {
        if index_path.section != 0 {
            return None;
        }
        self.issues.get(index_path.row)
    }

    pub fn cell_for_row(&self, index_path: IndexPath) -> Option<IssueCell> {
        let issue = self.issue_at(index_path)?;
        Some(IssueCell {
            title_label: Label {
                text: issue.title.clone(),
                style: self.theme.issues_feed_title_style(),
            },
        })
    }

    pub fn did_select_row(&self, index_path: IndexPath, navigator: &mut dyn Navigator) {
        let Some(issue) = self.issue_at(index_path) else {
            debug!(row = index_path.row, section = index_path.section, "selection out of range");
            return;
        };

        debug!(title = %issue.title, "opening issue");
        let controller = self.provider.provide_instance(Arc::clone(issue));
        navigator.push(controller);
    }

    // Keyboard cursor

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_issue(&self) -> Option<&Arc<Issue>> {
        self.issues.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.issues.is_empty() && self.selected < self.issues.len() - 1 {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.issues.len().saturating_sub(1);
    }

    pub fn select_current(&self, navigator: &mut dyn Navigator) {
        self.did_select_row(IndexPath::new(self.selected, 0), navigator);
    }
}
