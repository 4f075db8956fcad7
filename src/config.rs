use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::{Color, Modifier};
use serde::Deserialize;
use tracing::warn;

use crate::error::{FeedError, Result};

/// Text attributes a terminal can stand in for a font with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontWeight {
    pub fn modifier(&self) -> Modifier {
        match self {
            FontWeight::Regular => Modifier::empty(),
            FontWeight::Bold => Modifier::BOLD,
            FontWeight::Italic => Modifier::ITALIC,
            FontWeight::BoldItalic => Modifier::BOLD | Modifier::ITALIC,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Feed URL or path to a local JSON file
    pub url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: 10,
        }
    }
}

impl FeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub accent: Color,
    pub title: Color,
    pub body: Color,
    pub link: Color,
    pub highlight: Color,
    pub title_font: FontWeight,
    pub tab_bar_font: FontWeight,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            title: Color::White,
            body: Color::Gray,
            link: Color::Blue,
            highlight: Color::DarkGray,
            title_font: FontWeight::Bold,
            tab_bar_font: FontWeight::Regular,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

fn config_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("issuefeed").join("config.toml"))
}

impl Config {
    /// Load an explicitly requested config file, or the default one.
    ///
    /// An explicit path must exist and parse. The default path is optional and
    /// falls back to built-in defaults when missing or broken.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let content = std::fs::read_to_string(path).map_err(|e| {
                FeedError::Config(format!("cannot read {}: {}", path.display(), e))
            })?;
            return Self::parse(&content);
        }

        let Some(path) = config_path() else {
            return Ok(Config::default());
        };

        let Ok(content) = std::fs::read_to_string(&path) else {
            return Ok(Config::default());
        };

        match Self::parse(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                Ok(Config::default())
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| FeedError::Config(e.to_string()))
    }

    /// The feed source, preferring a command-line override
    pub fn feed_source(&self, cli_feed: Option<String>) -> Result<String> {
        cli_feed.or_else(|| self.feed.url.clone()).ok_or_else(|| {
            FeedError::Config("no feed configured; pass --feed or set feed.url".to_string())
        })
    }
}
