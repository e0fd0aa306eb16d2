//! Transient alert toast — a one-line overlay in the top-right corner,
//! auto-dismissed by the app shell after the configured timeout.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Clear, Paragraph, Widget},
};

pub struct AlertToast<'a> {
    message: &'a str,
    theme: &'a Theme,
}

impl<'a> AlertToast<'a> {
    pub fn new(message: &'a str, theme: &'a Theme) -> Self {
        Self { message, theme }
    }

    /// The top-right rect this toast should occupy within `area`.
    pub fn anchor(&self, area: Rect) -> Rect {
        let width = (self.message.chars().count() as u16 + 2).min(area.width);
        Rect {
            x: area.right().saturating_sub(width),
            y: area.y + 1,
            width,
            height: 1,
        }
    }
}

impl Widget for AlertToast<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        Paragraph::new(Line::styled(
            format!(" {} ", self.message),
            self.theme.alert,
        ))
        .render(area, buf);
    }
}
