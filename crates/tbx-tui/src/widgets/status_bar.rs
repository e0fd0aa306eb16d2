//! Status bar widget — the single bottom row showing extraction statistics
//! and context-sensitive key hints.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use tbx_core::ExtractionStats;

pub struct StatusBar<'a> {
    stats: Option<ExtractionStats>,
    hint: &'a str,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(stats: Option<ExtractionStats>, hint: &'a str, theme: &'a Theme) -> Self {
        Self { stats, hint, theme }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(stats) = self.stats {
            let text = format!(
                " Total Entries: {}  │  Total Characters: {} ",
                stats.total_count, stats.char_count
            );
            buf.set_string(area.x, area.y, text, self.theme.stats);
        }

        let hint_x = area.right().saturating_sub(self.hint.len() as u16);
        buf.set_string(
            hint_x,
            area.y,
            self.hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}
