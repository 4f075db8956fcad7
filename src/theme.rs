use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeConfig;

/// Presentation values for every screen.
///
/// A "font" is the set of terminal text attributes used for a piece of text.
/// Implementations hold no mutable state: the same theme answers the same way
/// on every call.
pub trait Theme: Send + Sync + std::fmt::Debug {
    fn tab_bar_font(&self) -> Modifier;
    fn tab_bar_text_color(&self) -> Color;

    fn navigation_bar_font(&self) -> Modifier;
    fn navigation_bar_text_color(&self) -> Color;
    fn navigation_bar_background_color(&self) -> Color;

    fn issues_feed_title_font(&self) -> Modifier;
    fn issues_feed_title_color(&self) -> Color;

    fn issue_title_font(&self) -> Modifier;
    fn issue_title_color(&self) -> Color;
    fn issue_body_color(&self) -> Color;
    fn issue_link_color(&self) -> Color;

    fn highlight_background_color(&self) -> Color;
    fn muted_color(&self) -> Color;
    fn error_color(&self) -> Color;

    fn tab_bar_style(&self) -> Style {
        Style::default()
            .fg(self.tab_bar_text_color())
            .add_modifier(self.tab_bar_font())
    }

    fn navigation_bar_style(&self) -> Style {
        Style::default()
            .fg(self.navigation_bar_text_color())
            .bg(self.navigation_bar_background_color())
            .add_modifier(self.navigation_bar_font())
    }

    fn issues_feed_title_style(&self) -> Style {
        Style::default()
            .fg(self.issues_feed_title_color())
            .add_modifier(self.issues_feed_title_font())
    }

    fn issue_title_style(&self) -> Style {
        Style::default()
            .fg(self.issue_title_color())
            .add_modifier(self.issue_title_font())
    }
}

/// Theme built from the `[theme]` table of the config file
#[derive(Debug, Clone)]
pub struct DefaultTheme {
    config: ThemeConfig,
}

impl DefaultTheme {
    pub fn new(config: &ThemeConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl Default for DefaultTheme {
    fn default() -> Self {
        Self::new(&ThemeConfig::default())
    }
}

impl Theme for DefaultTheme {
    fn tab_bar_font(&self) -> Modifier {
        self.config.tab_bar_font.modifier()
    }

    fn tab_bar_text_color(&self) -> Color {
        self.config.accent
    }

    fn navigation_bar_font(&self) -> Modifier {
        Modifier::BOLD
    }

    fn navigation_bar_text_color(&self) -> Color {
        self.config.accent
    }

    fn navigation_bar_background_color(&self) -> Color {
        self.config.highlight
    }

    fn issues_feed_title_font(&self) -> Modifier {
        self.config.title_font.modifier()
    }

    fn issues_feed_title_color(&self) -> Color {
        self.config.title
    }

    fn issue_title_font(&self) -> Modifier {
        self.config.title_font.modifier()
    }

    fn issue_title_color(&self) -> Color {
        self.config.accent
    }

    fn issue_body_color(&self) -> Color {
        self.config.body
    }

    fn issue_link_color(&self) -> Color {
        self.config.link
    }

    fn highlight_background_color(&self) -> Color {
        self.config.highlight
    }

    fn muted_color(&self) -> Color {
        Color::Gray
    }

    fn error_color(&self) -> Color {
        Color::Red
    }
}
