use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;
use tracing::debug;

use crate::action::Action;
use crate::error::FeedError;
use crate::event::Event;
use crate::issue::IssueController;
use crate::issues::IssuesScreen;
use crate::navigation::NavigationStack;
use crate::provider::IssueControllerProvider;
use crate::repository::IssueRepository;
use crate::theme::Theme;
use crate::types::Issue;
use crate::ui;

pub struct App {
    pub issues: IssuesScreen,
    pub navigation: NavigationStack,
    pub scroll_offset: usize,
    /// Terminal size as (width, height)
    pub viewport: (u16, u16),
    clipboard: Option<arboard::Clipboard>,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        repository: Arc<dyn IssueRepository>,
        provider: Arc<dyn IssueControllerProvider>,
        theme: Arc<dyn Theme>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            issues: IssuesScreen::new(repository, provider, theme, action_tx),
            navigation: NavigationStack::new(),
            scroll_offset: 0,
            viewport: (80, 24),
            clipboard: None,
            error: None,
            notice: None,
            should_quit: false,
        }
    }

    pub fn theme(&self) -> &Arc<dyn Theme> {
        self.issues.theme()
    }

    /// Detail controller on top of the stack, if any
    pub fn current_detail(&self) -> Option<&Arc<IssueController>> {
        self.navigation.top()
    }

    /// The issue the user is looking at: the open detail, else the list cursor
    pub fn focused_issue(&self) -> Option<&Arc<Issue>> {
        match self.navigation.top() {
            Some(controller) => Some(controller.issue()),
            None => self.issues.selected_issue(),
        }
    }

    /// Largest useful detail scroll offset for the current viewport
    pub fn max_scroll(&self) -> usize {
        let Some(controller) = self.navigation.top() else {
            return 0;
        };
        let (width, height) = self.viewport;
        let body = ui::detail_body_inner(width, height);
        controller
            .wrapped_body(body.width as usize)
            .len()
            .saturating_sub(body.height as usize)
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Init => Action::Appear,
            Event::Resize(width, height) => Action::Resize(width, height),
            Event::Key(key) => self.handle_key(key),
            _ => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        let at_root = self.navigation.is_root();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                if at_root {
                    Action::Quit
                } else {
                    Action::Back
                }
            }
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::Char('g') | KeyCode::Home => Action::GoToTop,
            KeyCode::Char('G') | KeyCode::End => Action::GoToBottom,
            KeyCode::Enter if at_root => Action::Select,
            KeyCode::Char('r') if at_root => Action::Refresh,
            KeyCode::Char('o') => Action::OpenInBrowser,
            KeyCode::Char('y') => Action::YankUrl,
            _ => Action::None,
        }
    }

    pub fn update(&mut self, action: Action) {
        if !matches!(action, Action::None | Action::Quit | Action::Resize(..)) {
            self.error = None;
            self.notice = None;
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Back => {
                if self.navigation.pop().is_none() {
                    self.should_quit = true;
                    return;
                }
                self.scroll_offset = 0;
                if self.navigation.is_root() {
                    self.issues.view_will_appear();
                }
            }
            Action::ScrollUp => {
                if self.navigation.is_root() {
                    self.issues.select_previous();
                } else {
                    self.scroll_offset = self.scroll_offset.saturating_sub(1);
                }
            }
            Action::ScrollDown => {
                if self.navigation.is_root() {
                    self.issues.select_next();
                } else {
                    self.scroll_offset = (self.scroll_offset + 1).min(self.max_scroll());
                }
            }
            Action::GoToTop => {
                if self.navigation.is_root() {
                    self.issues.select_first();
                } else {
                    self.scroll_offset = 0;
                }
            }
            Action::GoToBottom => {
                if self.navigation.is_root() {
                    self.issues.select_last();
                } else {
                    self.scroll_offset = self.max_scroll();
                }
            }
            Action::Select => {
                if self.navigation.is_root() {
                    self.issues.select_current(&mut self.navigation);
                    if !self.navigation.is_root() {
                        debug!(depth = self.navigation.depth(), "pushed issue detail");
                        self.scroll_offset = 0;
                    }
                }
            }

            Action::Resize(width, height) => {
                self.viewport = (width, height);
                self.scroll_offset = self.scroll_offset.min(self.max_scroll());
            }

            Action::Appear | Action::Refresh => {
                self.issues.view_will_appear();
            }
            Action::IssuesLoaded(issues) => {
                self.issues.issues_loaded(issues);
            }
            Action::IssuesFailed(msg) => {
                self.issues.issues_failed(msg);
            }

            Action::OpenInBrowser => {
                if let Some(url) = self.focused_image_url() {
                    debug!(%url, "opening image");
                    if let Err(e) = open::that(&url) {
                        self.update(FeedError::from(e).into());
                    }
                }
            }
            Action::YankUrl => {
                if let Some(url) = self.focused_image_url() {
                    match self.copy_to_clipboard(&url) {
                        Ok(()) => self.notice = Some(format!("Copied {}", url)),
                        Err(e) => self.error = Some(format!("Clipboard unavailable: {}", e)),
                    }
                }
            }

            Action::Error(msg) => {
                self.error = Some(msg);
            }
            Action::None => {}
        }
    }

    /// On X11 and Wayland copied text is only served while the clipboard
    /// that set it is alive, so one is kept for the life of the app.
    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), arboard::Error> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()?,
        };
        self.clipboard.insert(clipboard).set_text(text)
    }

    fn focused_image_url(&mut self) -> Option<String> {
        let url = self
            .focused_issue()
            .map(|issue| issue.image_url.clone())
            .filter(|url| !url.is_empty());
        if url.is_none() {
            self.notice = Some("No image link for this issue".to_string());
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::issues::FeedState;
    use crate::navigation::Navigator;
    use crate::testing::{fakes, issue, FakeIssueControllerProvider, FakeIssueRepository};

    struct AppHarness {
        app: App,
        repository: Arc<FakeIssueRepository>,
        provider: Arc<FakeIssueControllerProvider>,
        rx: mpsc::UnboundedReceiver<Action>,
    }

    impl AppHarness {
        fn pump(&mut self) {
            while let Ok(action) = self.rx.try_recv() {
                self.app.update(action);
            }
        }

        fn loaded(titles: &[&str]) -> Self {
            let mut h = app();
            let init = h.app.handle_event(Event::Init);
            h.app.update(init);
            h.repository
                .succeed(titles.iter().map(|t| issue(t)).collect());
            h.pump();
            h
        }
    }

    fn app() -> AppHarness {
        let (tx, rx) = mpsc::unbounded_channel();
        let fakes = fakes();
        let app = App::new(
            fakes.repository.clone(),
            fakes.provider.clone(),
            fakes.theme,
            tx,
        );
        AppHarness {
            app,
            repository: fakes.repository,
            provider: fakes.provider,
            rx,
        }
    }

    fn open_detail(h: &mut AppHarness, body: &str) {
        let issue = Arc::new(Issue::new("detail", body, ""));
        let controller = IssueController::new(issue, Arc::clone(h.app.theme()));
        h.app.navigation.push(Arc::new(controller));
    }

    fn numbered_lines(count: usize) -> String {
        (1..=count)
            .map(|n| format!("line {}", n))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn init_makes_the_list_appear() {
        let mut h = app();
        let action = h.app.handle_event(Event::Init);
        assert!(matches!(action, Action::Appear));

        h.app.update(action);
        assert_eq!(h.repository.fetch_count(), 1);
        assert_eq!(h.app.issues.state(), &FeedState::Loading);
    }

    #[test]
    fn ticks_and_renders_do_nothing() {
        let h = app();
        assert!(matches!(h.app.handle_event(Event::Tick), Action::None));
        assert!(matches!(h.app.handle_event(Event::Render), Action::None));
    }

    #[test]
    fn resize_records_the_viewport() {
        let mut h = app();
        let action = h.app.handle_event(Event::Resize(100, 30));
        assert!(matches!(action, Action::Resize(100, 30)));

        h.app.update(action);
        assert_eq!(h.app.viewport, (100, 30));
    }

    #[test]
    fn resize_keeps_an_error_on_screen() {
        let mut h = app();
        h.app.update(Action::Error("boom".to_string()));
        h.app.update(Action::Resize(100, 30));
        assert_eq!(h.app.error.as_deref(), Some("boom"));
    }

    #[test]
    fn completions_reach_the_screen_through_the_channel() {
        let h = AppHarness::loaded(&["Big Money in Little DC", "Long Live The NHS"]);
        assert_eq!(h.app.issues.number_of_rows_in_section(0), 2);
    }

    #[test]
    fn enter_opens_the_selected_issue() {
        let mut h = AppHarness::loaded(&["first", "second"]);
        let down = h.app.handle_event(key(KeyCode::Down));
        h.app.update(down);
        let enter = h.app.handle_event(key(KeyCode::Enter));
        h.app.update(enter);

        assert_eq!(h.app.navigation.depth(), 1);
        assert_eq!(h.provider.last_issue().unwrap().title, "second");
        assert!(Arc::ptr_eq(
            h.app.current_detail().unwrap(),
            &h.provider.controller
        ));
    }

    #[test]
    fn back_to_the_list_fetches_again() {
        let mut h = AppHarness::loaded(&["first"]);
        h.app.update(Action::Select);
        assert_eq!(h.repository.fetch_count(), 1);

        let back = h.app.handle_event(key(KeyCode::Char('q')));
        assert!(matches!(back, Action::Back));
        h.app.update(back);

        assert!(h.app.navigation.is_root());
        assert_eq!(h.repository.fetch_count(), 2);
        assert!(!h.app.should_quit);
    }

    #[test]
    fn q_at_the_root_quits() {
        let mut h = app();
        let action = h.app.handle_event(key(KeyCode::Char('q')));
        assert!(matches!(action, Action::Quit));
        h.app.update(action);
        assert!(h.app.should_quit);
    }

    #[test]
    fn refresh_only_applies_to_the_list() {
        let mut h = AppHarness::loaded(&["first"]);
        assert!(matches!(
            h.app.handle_event(key(KeyCode::Char('r'))),
            Action::Refresh
        ));

        h.app.update(Action::Select);
        assert!(matches!(
            h.app.handle_event(key(KeyCode::Char('r'))),
            Action::None
        ));
        assert!(matches!(
            h.app.handle_event(key(KeyCode::Enter)),
            Action::None
        ));
    }

    #[test]
    fn scrolling_moves_the_detail_not_the_cursor() {
        let mut h = AppHarness::loaded(&["first", "second"]);
        open_detail(&mut h, &numbered_lines(30));

        h.app.update(Action::ScrollDown);
        h.app.update(Action::ScrollDown);
        h.app.update(Action::ScrollUp);
        assert_eq!(h.app.scroll_offset, 1);
        assert_eq!(h.app.issues.selected(), 0);

        h.app.update(Action::GoToTop);
        assert_eq!(h.app.scroll_offset, 0);
    }

    #[test]
    fn detail_scroll_stops_at_the_last_page() {
        let mut h = app();
        open_detail(&mut h, &numbered_lines(30));
        // 80x24 leaves 16 body rows
        assert_eq!(h.app.max_scroll(), 14);

        h.app.update(Action::GoToBottom);
        assert_eq!(h.app.scroll_offset, 14);
        for _ in 0..10 {
            h.app.update(Action::ScrollDown);
        }
        assert_eq!(h.app.scroll_offset, 14);
        h.app.update(Action::ScrollUp);
        assert_eq!(h.app.scroll_offset, 13);
    }

    #[test]
    fn growing_the_terminal_clamps_the_detail_scroll() {
        let mut h = app();
        open_detail(&mut h, &numbered_lines(30));
        h.app.update(Action::GoToBottom);

        h.app.update(Action::Resize(80, 60));
        assert_eq!(h.app.max_scroll(), 0);
        assert_eq!(h.app.scroll_offset, 0);
    }

    #[test]
    fn short_bodies_do_not_scroll() {
        let mut h = AppHarness::loaded(&["first"]);
        h.app.update(Action::Select);
        h.app.update(Action::ScrollDown);
        h.app.update(Action::GoToBottom);
        assert_eq!(h.app.scroll_offset, 0);
    }

    #[test]
    fn yank_keeps_the_clipboard_open() {
        let mut h = AppHarness::loaded(&["first"]);
        h.app.update(Action::YankUrl);

        // headless machines have no clipboard to hold on to
        match h.app.error.as_deref() {
            None => {
                assert!(h.app.clipboard.is_some());
                assert_eq!(
                    h.app.notice.as_deref(),
                    Some("Copied https://example.org/image.png")
                );
            }
            Some(error) => {
                assert!(error.starts_with("Clipboard unavailable"));
            }
        }
    }

    #[test]
    fn focused_issue_prefers_the_open_detail() {
        let mut h = AppHarness::loaded(&["first", "second"]);
        assert_eq!(h.app.focused_issue().unwrap().title, "first");

        h.app.update(Action::Select);
        assert_eq!(h.app.focused_issue().unwrap().title, "a title");
    }

    #[test]
    fn failures_surface_as_screen_state() {
        let mut h = app();
        h.app.update(Action::Appear);
        h.repository
            .fail(FeedError::Request("connection refused".to_string()));
        h.pump();

        assert!(matches!(h.app.issues.state(), FeedState::Failed(_)));
        assert_eq!(h.app.issues.number_of_rows_in_section(0), 0);
    }

    #[test]
    fn errors_clear_on_the_next_action() {
        let mut h = app();
        h.app.update(Action::Error("boom".to_string()));
        assert_eq!(h.app.error.as_deref(), Some("boom"));

        h.app.update(Action::ScrollDown);
        assert!(h.app.error.is_none());
    }

    #[test]
    fn nothing_to_open_without_issues() {
        let mut h = app();
        h.app.update(Action::OpenInBrowser);
        assert!(h.app.error.is_none());
        assert_eq!(
            h.app.notice.as_deref(),
            Some("No image link for this issue")
        );
    }
}
