use std::mem;
use std::sync::Arc;

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::theme::Theme;
use crate::types::Issue;

/// Detail view for a single issue
#[derive(Debug)]
pub struct IssueController {
    issue: Arc<Issue>,
    theme: Arc<dyn Theme>,
}

impl IssueController {
    pub fn new(issue: Arc<Issue>, theme: Arc<dyn Theme>) -> Self {
        Self { issue, theme }
    }

    pub fn issue(&self) -> &Arc<Issue> {
        &self.issue
    }

    pub fn title_line(&self) -> Line<'_> {
        Line::from(Span::styled(
            self.issue.title.as_str(),
            self.theme.issue_title_style(),
        ))
    }

    /// Body paragraphs followed by the image locator, if any
    pub fn body_lines(&self) -> Vec<Line<'_>> {
        let body_style = Style::default().fg(self.theme.issue_body_color());

        let mut lines: Vec<Line> = if self.issue.body.trim().is_empty() {
            vec![Line::from(Span::styled(
                "No description provided.",
                Style::default().fg(self.theme.muted_color()),
            ))]
        } else {
            self.issue
                .body
                .lines()
                .map(|l| Line::from(Span::styled(l.replace('\t', "    "), body_style)))
                .collect()
        };

        if !self.issue.image_url.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Image: ", Style::default().fg(self.theme.muted_color())),
                Span::styled(
                    self.issue.image_url.as_str(),
                    Style::default().fg(self.theme.issue_link_color()),
                ),
            ]));
        }

        lines
    }

    /// Body lines wrapped at word boundaries to `width` columns, one entry per
    /// screen row. Words longer than a row are split.
    pub fn wrapped_body(&self, width: usize) -> Vec<Line<'static>> {
        let width = width.max(1);
        let mut rows = Vec::new();
        for line in self.body_lines() {
            wrap_line(&line, width, &mut rows);
        }
        rows
    }
}

fn wrap_line(line: &Line, width: usize, rows: &mut Vec<Line<'static>>) {
    let start = rows.len();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for span in &line.spans {
        for mut word in span.content.split_inclusive(' ') {
            loop {
                // trailing spaces may run past the edge
                let visible = word.trim_end_matches(' ').chars().count();
                if used + visible <= width {
                    row.push(Span::styled(word.to_string(), span.style));
                    used += word.chars().count();
                    break;
                }
                if used > 0 {
                    rows.push(Line::from(mem::take(&mut row)));
                    used = 0;
                    continue;
                }
                let split = word
                    .char_indices()
                    .nth(width)
                    .map_or(word.len(), |(i, _)| i);
                row.push(Span::styled(word[..split].to_string(), span.style));
                rows.push(Line::from(mem::take(&mut row)));
                word = &word[split..];
            }
        }
    }

    if !row.is_empty() || rows.len() == start {
        rows.push(Line::from(row));
    }
}
