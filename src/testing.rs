//! Test doubles shared by the screen, app and render tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ratatui::style::{Color, Modifier};
use tokio::sync::mpsc;

use crate::action::Action;
use crate::error::FeedError;
use crate::issue::IssueController;
use crate::issues::IssuesScreen;
use crate::provider::IssueControllerProvider;
use crate::repository::{Completion, IssueRepository};
use crate::theme::Theme;
use crate::types::Issue;

pub fn issue(title: &str) -> Arc<Issue> {
    Arc::new(Issue::new(title, "body", "https://example.org/image.png"))
}

/// Theme with values no production theme uses
#[derive(Debug, Default)]
pub struct FakeTheme;

impl Theme for FakeTheme {
    fn tab_bar_font(&self) -> Modifier {
        Modifier::ITALIC
    }

    fn tab_bar_text_color(&self) -> Color {
        Color::Rgb(128, 0, 128)
    }

    fn navigation_bar_font(&self) -> Modifier {
        Modifier::BOLD
    }

    fn navigation_bar_text_color(&self) -> Color {
        Color::White
    }

    fn navigation_bar_background_color(&self) -> Color {
        Color::Blue
    }

    fn issues_feed_title_font(&self) -> Modifier {
        Modifier::BOLD
    }

    fn issues_feed_title_color(&self) -> Color {
        Color::Magenta
    }

    fn issue_title_font(&self) -> Modifier {
        Modifier::UNDERLINED
    }

    fn issue_title_color(&self) -> Color {
        Color::Green
    }

    fn issue_body_color(&self) -> Color {
        Color::LightYellow
    }

    fn issue_link_color(&self) -> Color {
        Color::LightBlue
    }

    fn highlight_background_color(&self) -> Color {
        Color::DarkGray
    }

    fn muted_color(&self) -> Color {
        Color::Gray
    }

    fn error_color(&self) -> Color {
        Color::LightRed
    }
}

/// Records fetches and keeps their completions for the test to resolve
#[derive(Debug, Default)]
pub struct FakeIssueRepository {
    fetch_count: AtomicUsize,
    completions: Mutex<Vec<Completion>>,
}

impl FakeIssueRepository {
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    pub fn take_completions(&self) -> Vec<Completion> {
        std::mem::take(&mut *self.completions.lock().unwrap())
    }

    fn last_completion(&self) -> Completion {
        self.completions
            .lock()
            .unwrap()
            .pop()
            .expect("fetch_issues was not called")
    }

    /// Resolve the most recent fetch successfully
    pub fn succeed(&self, issues: Vec<Arc<Issue>>) {
        self.last_completion().succeed(issues);
    }

    pub fn fail(&self, err: FeedError) {
        self.last_completion().fail(err);
    }
}

impl IssueRepository for FakeIssueRepository {
    fn fetch_issues(&self, completion: Completion) {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        self.completions.lock().unwrap().push(completion);
    }
}

/// Hands out one shared controller and remembers the issue it was asked for
#[derive(Debug)]
pub struct FakeIssueControllerProvider {
    pub controller: Arc<IssueController>,
    last_issue: Mutex<Option<Arc<Issue>>>,
}

impl FakeIssueControllerProvider {
    pub fn new() -> Self {
        Self {
            controller: Arc::new(IssueController::new(issue("a title"), Arc::new(FakeTheme))),
            last_issue: Mutex::new(None),
        }
    }

    pub fn last_issue(&self) -> Option<Arc<Issue>> {
        self.last_issue.lock().unwrap().clone()
    }
}

impl IssueControllerProvider for FakeIssueControllerProvider {
    fn provide_instance(&self, issue: Arc<Issue>) -> Arc<IssueController> {
        *self.last_issue.lock().unwrap() = Some(issue);
        Arc::clone(&self.controller)
    }
}

pub struct Fakes {
    pub repository: Arc<FakeIssueRepository>,
    pub provider: Arc<FakeIssueControllerProvider>,
    pub theme: Arc<FakeTheme>,
}

pub fn fakes() -> Fakes {
    Fakes {
        repository: Arc::new(FakeIssueRepository::default()),
        provider: Arc::new(FakeIssueControllerProvider::new()),
        theme: Arc::new(FakeTheme),
    }
}

pub struct ScreenHarness {
    pub screen: IssuesScreen,
    pub repository: Arc<FakeIssueRepository>,
    pub provider: Arc<FakeIssueControllerProvider>,
    rx: mpsc::UnboundedReceiver<Action>,
}

pub fn harness() -> ScreenHarness {
    let (tx, rx) = mpsc::unbounded_channel();
    let Fakes {
        repository,
        provider,
        theme,
    } = fakes();
    let screen = IssuesScreen::new(repository.clone(), provider.clone(), theme, tx);

    ScreenHarness {
        screen,
        repository,
        provider,
        rx,
    }
}

impl ScreenHarness {
    /// Apply every completion that has been posted so far
    pub fn pump(&mut self) {
        while let Ok(action) = self.rx.try_recv() {
            match action {
                Action::IssuesLoaded(issues) => self.screen.issues_loaded(issues),
                Action::IssuesFailed(msg) => self.screen.issues_failed(msg),
                other => panic!("unexpected action {:?}", other),
            }
        }
    }
}
