//! tbx TUI — ratatui application shell.
//!
//! Two tools behind a tab bar: the log extractor and the encryption tool.
//! The binary resolves CLI flags into [`RunOptions`] and calls [`run`].

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::{App, RunOptions};

/// Load config and theme, then start the TUI.
pub fn run(options: RunOptions) -> anyhow::Result<()> {
    let config =
        tbx_core::config::Config::load().unwrap_or_else(|_| tbx_core::config::Config::defaults());
    let theme = theme::Theme::load_default();
    App::new(config, theme, options).run()
}
