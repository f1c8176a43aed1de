//! Transient notification in the bottom-right corner.
//!
//! Used for confirmations that need no acknowledgement ("Profile updated").
//! Failures go through the modal alert instead.

use crate::styles::theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget};
use std::time::{Duration, Instant};

const DEFAULT_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Info,
    Warning,
}

impl ToastVariant {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastVariant::Success => "\u{2714}", // ✔
            ToastVariant::Info => "\u{2139}",    // ℹ
            ToastVariant::Warning => "\u{26A0}", // ⚠
        }
    }

    fn color(&self) -> Color {
        let t = theme();
        match self {
            ToastVariant::Success => t.success,
            ToastVariant::Info => t.primary,
            ToastVariant::Warning => t.warning,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub variant: ToastVariant,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, variant: ToastVariant) -> Self {
        Self {
            message: message.into(),
            variant,
            created_at: Instant::now(),
            duration: DEFAULT_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

struct ToastWidget<'a> {
    toast: &'a Toast,
}

impl Widget for ToastWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = theme();
        let message = format!(" {} {} ", self.toast.variant.icon(), self.toast.message);
        let width = (message.chars().count() as u16 + 2)
            .clamp(20, 50)
            .min(area.width.saturating_sub(2));
        let height = 3u16.min(area.height);
        // Sit just above the footer
        let toast_area = Rect::new(
            area.x + area.width.saturating_sub(width + 1),
            area.y + area.height.saturating_sub(height + 2),
            width,
            height,
        );

        Clear.render(toast_area, buf);

        let border_style = if t.theme_type == crate::styles::ThemeType::NoColor {
            Style::default()
        } else {
            Style::default().fg(self.toast.variant.color())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .style(t.background_style());

        Paragraph::new(message)
            .block(block)
            .style(t.text_style().add_modifier(Modifier::BOLD))
            .render(toast_area, buf);
    }
}

/// Holds the single visible toast; a new one replaces the old.
#[derive(Debug, Default)]
pub struct ToastManager {
    current: Option<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toast: Toast) {
        self.current = Some(toast);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Toast::new(message, ToastVariant::Success));
    }

    /// Drop an expired toast. Returns whether one is still showing.
    pub fn tick(&mut self) -> bool {
        if self.current.as_ref().is_some_and(Toast::is_expired) {
            self.current = None;
        }
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn render(&self, frame: &mut ratatui::Frame, area: Rect) {
        if let Some(toast) = self.current() {
            frame.render_widget(ToastWidget { toast }, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expires() {
        let mut toasts = ToastManager::new();
        toasts.push(Toast::new("Profile updated", ToastVariant::Success).with_duration(Duration::ZERO));
        assert!(!toasts.tick());
        assert!(toasts.current().is_none());
    }

    #[test]
    fn test_new_toast_replaces_old() {
        let mut toasts = ToastManager::new();
        toasts.success("first");
        toasts.push(Toast::new("second", ToastVariant::Info));
        assert!(toasts.tick());
        assert_eq!(toasts.current().map(|t| t.message.as_str()), Some("second"));
    }
}
