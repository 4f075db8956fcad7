mod detail;
mod feed;

use std::rc::Rc;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs};
use ratatui::Frame;

use crate::app::App;
use crate::issues::{ControlState, FeedState};

fn main_chunks(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area)
}

/// Text area of the detail body for a terminal of the given size
pub fn detail_body_inner(width: u16, height: u16) -> Rect {
    let chunks = main_chunks(Rect::new(0, 0, width, height));
    detail::body_inner(chunks[1])
}

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = main_chunks(frame.area());

    render_navigation_bar(frame, app, chunks[0]);

    match app.current_detail() {
        Some(controller) => detail::render(frame, app, controller, chunks[1]),
        None => feed::render(frame, &app.issues, chunks[1]),
    }

    render_tab_bar(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);
}

fn render_navigation_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let title = match app.current_detail() {
        Some(controller) => format!(" {} ", controller.issue().title),
        None => format!(" {} ", app.issues.navigation_title()),
    };

    let bar = Paragraph::new(Line::from(Span::styled(title, theme.navigation_bar_style())))
        .style(Style::default().bg(theme.navigation_bar_background_color()));

    frame.render_widget(bar, area);
}

fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let item = app.issues.tab_bar_item();
    let tabs = Tabs::new(vec![item.title.clone()])
        .select(0)
        .style(item.title_text_attributes(ControlState::Normal))
        .highlight_style(item.title_text_attributes(ControlState::Selected));

    frame.render_widget(tabs, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let status = if let Some(error) = &app.error {
        Span::styled(format!("Error: {}", error), Style::default().fg(theme.error_color()))
    } else if let Some(notice) = &app.notice {
        Span::styled(notice.as_str(), Style::default().fg(theme.muted_color()))
    } else {
        match (app.issues.state(), app.current_detail()) {
            (FeedState::Loading, None) => Span::styled(
                "Loading...",
                Style::default().fg(theme.issue_link_color()),
            ),
            (FeedState::Failed(msg), None) => Span::styled(
                format!("Could not load issues: {} (r: retry)", msg),
                Style::default().fg(theme.error_color()),
            ),
            (_, Some(_)) => Span::styled(
                "j/k/g/G: scroll | o: open image | y: copy link | q: back",
                Style::default().fg(theme.muted_color()),
            ),
            _ => {
                let updated = app
                    .issues
                    .last_updated()
                    .map(|t| format!("Updated {} | ", t.format("%H:%M")))
                    .unwrap_or_default();
                Span::styled(
                    format!(
                        "{}j/k/g/G: nav | Enter: open | r: refresh | o: image | q: quit",
                        updated
                    ),
                    Style::default().fg(theme.muted_color()),
                )
            }
        }
    };

    frame.render_widget(Paragraph::new(Line::from(status)), area);
}
