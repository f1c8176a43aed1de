use ratatui::layout::{Constraint, Layout, Rect};

/// A `width` x `height` rect centered in `area`, clamped to fit.
pub fn center_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Header, body and footer rows used by every screen.
pub fn create_standard_layout(area: Rect, header_height: u16, footer_height: u16) -> (Rect, Rect, Rect) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(header_height),
        Constraint::Min(0),
        Constraint::Length(footer_height),
    ])
    .areas(area);
    (header, body, footer)
}

/// Body narrowed to at most `max_width` columns and centered.
pub fn centered_column(area: Rect, max_width: u16) -> Rect {
    let width = max_width.min(area.width);
    Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height)
}
