use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::issues::{FeedState, IssuesScreen};
use crate::types::IndexPath;

pub fn render(frame: &mut Frame, screen: &IssuesScreen, area: Rect) {
    let theme = screen.theme();
    let rows = screen.number_of_rows_in_section(0);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ({}) ", screen.title(), rows));

    if rows == 0 {
        let message = match screen.state() {
            FeedState::Idle | FeedState::Loading => "",
            FeedState::Loaded | FeedState::Failed(_) => "No issues",
        };
        let empty = Paragraph::new(message)
            .block(block)
            .style(Style::default().fg(theme.muted_color()));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = (0..screen.number_of_sections())
        .flat_map(|section| {
            (0..screen.number_of_rows_in_section(section))
                .map(move |row| IndexPath::new(row, section))
        })
        .filter_map(|index_path| screen.cell_for_row(index_path))
        .map(|cell| {
            ListItem::new(Line::from(Span::styled(
                cell.title_label.text,
                cell.title_label.style,
            )))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme.highlight_background_color()))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(screen.selected()));

    frame.render_stateful_widget(list, area, &mut state);
}
