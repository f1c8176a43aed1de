//! Modal alert dialog.
//!
//! Handles centering, clearing the area behind it, borders and wrapped
//! content. The app keeps at most one open and closes it on Enter or Esc.

use crate::styles::theme;
use crate::utils::layout::center_popup;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Widget, Wrap};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogVariant {
    #[default]
    Default,
    Error,
}

/// Title and message of an open alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub variant: DialogVariant,
}

impl Alert {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            variant: DialogVariant::Error,
        }
    }
}

pub struct Dialog<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub variant: DialogVariant,
    pub footer: Option<&'a str>,
    pub min_width: u16,
    pub max_width: u16,
}

impl<'a> Dialog<'a> {
    /// Width follows the longest line, clamped to 40..=70 columns.
    pub fn new(title: &'a str, content: &'a str) -> Self {
        Self {
            title,
            content,
            variant: DialogVariant::Default,
            footer: None,
            min_width: 40,
            max_width: 70,
        }
    }

    pub fn from_alert(alert: &'a Alert) -> Self {
        Self::new(&alert.title, &alert.message).variant(alert.variant)
    }

    pub fn variant(mut self, variant: DialogVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn footer(mut self, footer: &'a str) -> Self {
        self.footer = Some(footer);
        self
    }

    fn size(&self, area: Rect) -> (u16, u16) {
        let longest = self
            .content
            .lines()
            .map(|l| l.chars().count())
            .chain(std::iter::once(self.title.chars().count()))
            .chain(self.footer.map(|f| f.chars().count()))
            .max()
            .unwrap_or(0) as u16;
        let width = (longest + 8)
            .clamp(self.min_width, self.max_width)
            .min(area.width.saturating_sub(4));

        let text_width = width.saturating_sub(6).max(1) as usize;
        let content_lines: u16 = self
            .content
            .lines()
            .map(|l| (l.chars().count().max(1)).div_ceil(text_width) as u16)
            .sum();
        // borders + blank line + content + blank + footer
        let footer_lines = if self.footer.is_some() { 2 } else { 0 };
        let height = (content_lines.max(1) + 4 + footer_lines).min(area.height.saturating_sub(2));
        (width, height)
    }
}

impl<'a> Widget for Dialog<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = theme();
        let (width, height) = self.size(area);
        let popup_area = center_popup(area, width, height);

        Widget::render(Clear, popup_area, buf);

        let border_style = match self.variant {
            DialogVariant::Default => t.border_focused_style(),
            DialogVariant::Error => t.error_style(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Line::from(format!(" {} ", self.title)).centered())
            .title_style(t.text_style().add_modifier(Modifier::BOLD))
            .padding(Padding::new(2, 2, 1, 1))
            .style(t.background_style());

        let inner = block.inner(popup_area);
        Widget::render(block, popup_area, buf);

        let mut lines: Vec<Line> = self
            .content
            .lines()
            .map(|l| Line::from(l.to_string()).style(t.text_style()))
            .collect();
        if let Some(footer) = self.footer {
            lines.push(Line::default());
            lines.push(Line::from(footer.to_string()).style(t.muted_style()).centered());
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_dialog_renders_title_and_message() {
        let alert = Alert::error("Error creating appointment", "Please try again.");
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        Dialog::from_alert(&alert).footer("Enter: OK").render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Error creating appointment"));
        assert!(text.contains("Please try again."));
        assert!(text.contains("Enter: OK"));
    }

    #[test]
    fn test_dialog_fits_small_area() {
        let area = Rect::new(0, 0, 30, 6);
        let dialog = Dialog::new("Title", "Some message that is long");
        let (w, h) = dialog.size(area);
        assert!(w <= 26);
        assert!(h <= 4);
    }
}
