//! Tab bar widget — renders the strip of tool tabs at the top of the screen.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Tabs, Widget},
};

/// Renders the 1-line strip of tool tabs at the top of the screen.
///
/// The active tool is highlighted. Keybinding hints (`q:quit  ?:help`) are
/// right-aligned in the same row.
pub struct TabBar<'a> {
    labels: &'a [&'a str],
    active: usize,
    theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(labels: &'a [&'a str], active: usize, theme: &'a Theme) -> Self {
        Self { labels, active, theme }
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let labels: Vec<Line> = self
            .labels
            .iter()
            .map(|label| Line::from(format!(" {label} ")))
            .collect();

        Tabs::new(labels)
            .select(self.active)
            .highlight_style(self.theme.tab_active)
            .divider("")
            .render(area, buf);

        // Keybinding hints at the right edge
        let hint = " q:quit  ?:help ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}
