use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

/// Brand shown in the header's top border.
pub const BRAND: &str = " GoBarber ";

/// Common header component for all screens
pub struct Header;

impl Header {
    /// Height used by [`Header::render`].
    pub const HEIGHT: u16 = 3;

    /// Render a bordered header with `title` on the left and an optional
    /// `aside` (usually the signed-in user) on the right.
    pub fn render(frame: &mut Frame, area: Rect, title: &str, aside: Option<&str>) {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_focused_style())
            .title(BRAND)
            .title_style(t.title_style())
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(aside.map_or(0, |a| a.chars().count() as u16))])
                .areas(inner);

        frame.render_widget(
            Paragraph::new(title).style(t.text_style().add_modifier(Modifier::BOLD)),
            left,
        );
        if let Some(aside) = aside {
            frame.render_widget(
                Paragraph::new(aside)
                    .style(t.muted_style())
                    .alignment(Alignment::Right),
                right,
            );
        }
    }
}
