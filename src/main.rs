mod action;
mod app;
mod config;
mod error;
mod event;
mod feed;
mod issue;
mod issues;
mod navigation;
mod provider;
mod repository;
#[cfg(test)]
mod testing;
mod theme;
mod tui;
mod types;
mod ui;

use std::panic;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::action::Action;
use crate::app::App;
use crate::config::Config;
use crate::event::Event;
use crate::provider::ThemedControllerProvider;
use crate::repository::FeedRepository;
use crate::theme::{DefaultTheme, Theme};
use crate::tui::EventHandler;

#[derive(Parser, Debug)]
#[command(name = "issuefeed", version, about = "Browse a feed of news and policy issues")]
struct Cli {
    /// Feed URL (http/https) or path to a local JSON file; overrides feed.url
    #[arg(short, long)]
    feed: Option<String>,

    /// Config file [default: <config dir>/issuefeed/config.toml]
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let source = config.feed_source(cli.feed)?;
    let feed = feed::from_source(&source, config.feed.timeout())?;
    tracing::debug!(%source, kind = feed.name(), "using feed");

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let theme: Arc<dyn Theme> = Arc::new(DefaultTheme::new(&config.theme));
    let repository = Arc::new(FeedRepository::new(feed));
    let provider = Arc::new(ThemedControllerProvider::new(Arc::clone(&theme)));

    let result = run(repository, provider, theme).await;

    // Restore terminal
    tui::restore()?;

    result
}

async fn run(
    repository: Arc<FeedRepository>,
    provider: Arc<ThemedControllerProvider>,
    theme: Arc<dyn Theme>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = tui::init()?;

    // Repository completions and key actions share one channel so that all
    // state changes happen on this task
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let mut app = App::new(repository, provider, theme, action_tx.clone());
    let size = terminal.size()?;
    app.update(Action::Resize(size.width, size.height));

    let tick_rate = Duration::from_millis(250);
    let render_rate = Duration::from_millis(16); // ~60fps
    let mut events = EventHandler::new(tick_rate, render_rate);

    loop {
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_quit() {
                    break;
                }

                match event {
                    Event::Render => {
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    Event::Resize(_, _) => {
                        terminal.autoresize()?;
                        action_tx.send(app.handle_event(event))?;
                    }
                    _ => {
                        let action = app.handle_event(event);
                        if !matches!(action, Action::None) {
                            action_tx.send(action)?;
                        }
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.update(action);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
