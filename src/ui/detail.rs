use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Text;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::issue::IssueController;

fn chunks(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);
    (chunks[0], chunks[1])
}

fn body_block() -> Block<'static> {
    Block::default().borders(Borders::ALL).title("Body")
}

pub fn body_inner(area: Rect) -> Rect {
    body_block().inner(chunks(area).1)
}

pub fn render(frame: &mut Frame, app: &App, controller: &IssueController, area: Rect) {
    let (header_area, body_area) = chunks(area);

    let header = Paragraph::new(controller.title_line())
        .block(Block::default().borders(Borders::ALL).title("Issue"));
    frame.render_widget(header, header_area);

    render_body(frame, app, controller, body_area);
}

fn render_body(frame: &mut Frame, app: &App, controller: &IssueController, area: Rect) {
    let inner = body_block().inner(area);
    let lines = controller.wrapped_body(inner.width as usize);

    // Lines are pre-wrapped, so one line is one screen row
    let inner_height = inner.height as usize;
    let max_scroll = lines.len().saturating_sub(inner_height);
    let scroll_offset = app.scroll_offset.min(max_scroll);

    let visible: Vec<_> = lines
        .into_iter()
        .skip(scroll_offset)
        .take(inner_height)
        .collect();

    frame.render_widget(Clear, area);

    let body = Paragraph::new(Text::from(visible)).block(body_block());

    frame.render_widget(body, area);
}
