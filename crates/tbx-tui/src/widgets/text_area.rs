//! Multi-line text input widget — the paste area for JSON payloads and
//! plaintext.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Enter` inserts a newline.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor one character.
//! - `Nav(Up)` / `Nav(Down)` move one line, keeping the column where the
//!   target line is long enough.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Text},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TextAreaState {
    /// The edited text.
    pub text: String,
    /// Byte offset of the cursor within `text`.
    pub cursor: usize,
}

impl TextAreaState {
    pub fn with_text(text: String) -> Self {
        let cursor = text.len();
        Self { text, cursor }
    }

    /// Reset to empty. Call when clearing the tool.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Handle a key event from the app shell.
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Char(c) => {
                self.text.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
            }
            AppEvent::Enter => {
                self.text.insert(self.cursor, '\n');
                self.cursor += 1;
            }
            AppEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = self.prev_boundary();
                    self.text.remove(prev);
                    self.cursor = prev;
                }
            }
            AppEvent::Nav(Direction::Left) => {
                if self.cursor > 0 {
                    self.cursor = self.prev_boundary();
                }
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.text.len() {
                    self.cursor = self.next_boundary();
                }
            }
            AppEvent::Nav(Direction::Up) => self.move_vertical(true),
            AppEvent::Nav(Direction::Down) => self.move_vertical(false),
            _ => {}
        }
    }

    /// Line index and character column of the cursor.
    pub fn line_col(&self) -> (usize, usize) {
        let before = &self.text[..self.cursor];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let col = before[line_start..].chars().count();
        (line, col)
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.text.len())
    }

    /// Move the cursor one line up or down, clamping the column to the
    /// target line's length.
    fn move_vertical(&mut self, up: bool) {
        let (line, col) = self.line_col();
        let target = if up {
            match line.checked_sub(1) {
                Some(t) => t,
                None => return,
            }
        } else {
            line + 1
        };

        let starts: Vec<usize> = std::iter::once(0)
            .chain(self.text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        if target >= starts.len() {
            return;
        }

        let start = starts[target];
        let end = self.text[start..]
            .find('\n')
            .map(|i| start + i)
            .unwrap_or(self.text.len());

        let mut idx = start;
        for _ in 0..col {
            if idx >= end {
                break;
            }
            match self.text[idx..].chars().next() {
                Some(c) => idx += c.len_utf8(),
                None => break,
            }
        }
        self.cursor = idx.min(end);
    }

    /// Vertical scroll offset that keeps the cursor line visible in a pane of
    /// the given inner height. Used by both rendering and cursor placement so
    /// the two always agree.
    fn scroll_for_height(&self, height: usize) -> usize {
        let (line, _) = self.line_col();
        line.saturating_sub(height.saturating_sub(1))
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct TextArea<'a> {
    state: &'a TextAreaState,
    title: &'a str,
    placeholder: &'a str,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> TextArea<'a> {
    pub fn new(
        state: &'a TextAreaState,
        title: &'a str,
        placeholder: &'a str,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, title, placeholder, focused, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let inner_height = area.height.saturating_sub(2) as usize;
        let (line, col) = self.state.line_col();
        let scroll = self.state.scroll_for_height(inner_height);
        let x = (area.x + 1 + col as u16).min(area.right().saturating_sub(2));
        let y = (area.y + 1 + (line - scroll) as u16).min(area.bottom().saturating_sub(2));
        (x, y)
    }
}

impl Widget for TextArea<'_> {
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

        if self.state.text.is_empty() && !self.focused {
            let placeholder = Text::from(
                self.placeholder
                    .lines()
                    .map(|l| Line::styled(l.to_string(), self.theme.output_placeholder))
                    .collect::<Vec<_>>(),
            );
            Paragraph::new(placeholder).render(inner, buf);
            return;
        }

        let scroll = self.state.scroll_for_height(inner.height as usize);
        Paragraph::new(self.state.text.as_str())
            .scroll((scroll as u16, 0))
            .render(inner, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn typed(s: &str) -> TextAreaState {
        let mut state = TextAreaState::default();
        for c in s.chars() {
            if c == '\n' {
                state.handle(&AppEvent::Enter);
            } else {
                state.handle(&AppEvent::Char(c));
            }
        }
        state
    }

    #[test]
    fn chars_and_newlines_accumulate() {
        let state = typed("ab\ncd");
        assert_eq!(state.text, "ab\ncd");
        assert_eq!(state.cursor, 5);
        assert_eq!(state.line_col(), (1, 2));
    }

    #[test]
    fn backspace_joins_lines() {
        let mut state = typed("ab\n");
        state.handle(&AppEvent::Backspace);
        assert_eq!(state.text, "ab");
        assert_eq!(state.cursor, 2);
    }

    #[test]
    fn left_right_cross_char_boundaries() {
        let mut state = typed("aé");
        state.handle(&AppEvent::Nav(Direction::Left));
        assert_eq!(state.cursor, 1);
        state.handle(&AppEvent::Nav(Direction::Left));
        assert_eq!(state.cursor, 0);
        state.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn vertical_movement_preserves_column() {
        let mut state = typed("abcd\nxy\nlong line");
        // Cursor at end of "long line" (line 2, col 9); up clamps to "xy".
        state.handle(&AppEvent::Nav(Direction::Up));
        assert_eq!(state.line_col(), (1, 2));
        // Up again carries the clamped column onto line 0.
        state.handle(&AppEvent::Nav(Direction::Up));
        assert_eq!(state.line_col(), (0, 2));
    }

    #[test]
    fn vertical_movement_clamps_at_edges() {
        let mut state = typed("ab");
        state.handle(&AppEvent::Nav(Direction::Up));
        assert_eq!(state.cursor, 2);
        state.handle(&AppEvent::Nav(Direction::Down));
        assert_eq!(state.cursor, 2);
    }

    #[test]
    fn insertion_mid_text() {
        let mut state = typed("ac");
        state.handle(&AppEvent::Nav(Direction::Left));
        state.handle(&AppEvent::Char('b'));
        assert_eq!(state.text, "abc");
        assert_eq!(state.cursor, 2);
    }

    #[test]
    fn clear_resets_everything() {
        let mut state = typed("abc");
        state.clear();
        assert_eq!(state.text, "");
        assert_eq!(state.cursor, 0);
    }
}
