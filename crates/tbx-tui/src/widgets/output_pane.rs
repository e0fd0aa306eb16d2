//! Output pane widget — the scrollable read-only result pane.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Scroll up one line |
//! | `↓` / `j` | Scroll down one line |
//! | `PageUp` / `Ctrl+u` | Scroll up one page |
//! | `PageDown` / `Ctrl+d` | Scroll down one page |
//! | `G` | Jump to the last line |
//!
//! `scroll` = number of lines hidden above the view (0 = top).

use std::cell::Cell;

use crate::event::AppEvent;
use crate::event::Direction;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Text},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct OutputPaneState {
    /// The displayed text (result or diagnostic message).
    pub text: String,
    /// Whether `text` is a diagnostic and should render in the error style.
    pub is_error: bool,
    /// Lines hidden above the visible window.
    pub scroll: usize,
    /// Cached from the last render so `handle()` can clamp scrolling.
    last_height: Cell<usize>,
}

impl Default for OutputPaneState {
    fn default() -> Self {
        Self {
            text: String::new(),
            is_error: false,
            scroll: 0,
            last_height: Cell::new(20),
        }
    }
}

impl OutputPaneState {
    /// Replace the pane contents and jump back to the top.
    pub fn set(&mut self, text: String, is_error: bool) {
        self.text = text;
        self.is_error = is_error;
        self.scroll = 0;
    }

    /// Reset to empty. Call when clearing the tool.
    pub fn clear(&mut self) {
        self.set(String::new(), false);
    }

    fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    fn max_scroll(&self) -> usize {
        self.line_count()
            .saturating_sub(self.last_height.get().max(1))
    }

    /// Handle a navigation event from the app shell.
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Down) => {
                self.scroll = (self.scroll + 1).min(self.max_scroll());
            }
            AppEvent::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(PAGE_STEP);
            }
            AppEvent::ScrollDown => {
                self.scroll = (self.scroll + PAGE_STEP).min(self.max_scroll());
            }
            AppEvent::ScrollToEnd => {
                self.scroll = self.max_scroll();
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct OutputPane<'a> {
    state: &'a OutputPaneState,
    title: &'a str,
    placeholder: &'a str,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> OutputPane<'a> {
    pub fn new(
        state: &'a OutputPaneState,
        title: &'a str,
        placeholder: &'a str,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, title, placeholder, focused, theme }
    }
}

impl Widget for OutputPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title(self.title.to_string())
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let height = inner.height as usize;
        // Cache for handle() — safe because draw always runs before handle()
        self.state.last_height.set(height);

        if self.state.text.is_empty() {
            Paragraph::new(Line::styled(
                self.placeholder.to_string(),
                self.theme.output_placeholder,
            ))
            .render(inner, buf);
            return;
        }

        let style = if self.state.is_error {
            self.theme.output_error
        } else {
            Style::default()
        };
        let lines: Vec<Line> = self
            .state
            .text
            .lines()
            .map(|l| Line::styled(l.to_string(), style))
            .collect();
        let total = lines.len();

        // Split inner into text (fill) + 1-column scrollbar strip inside the
        // borders, so the track height matches the visible content rows.
        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        let scroll = self.state.scroll.min(total.saturating_sub(1));
        Paragraph::new(Text::from(lines))
            .scroll((scroll as u16, 0))
            .render(text_area, buf);

        if total > height {
            let mut sb_state = ScrollbarState::new(total)
                .position(scroll)
                .viewport_content_length(height);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
