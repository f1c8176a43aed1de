use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Common footer component
pub struct Footer;

impl Footer {
    /// 1 line of border, 1 of text
    pub const HEIGHT: u16 = 2;

    /// Render hint text of the form `Enter: Confirm | Esc: Back`, colouring keys
    /// and labels separately.
    pub fn render(frame: &mut Frame, area: Rect, text: &str) {
        let t = theme();
        let footer_block = Block::default()
            .borders(Borders::TOP)
            .border_style(t.border_style())
            .border_type(BorderType::Rounded);

        let footer_inner = footer_block.inner(area);
        let footer = Paragraph::new(hint_line(text)).alignment(Alignment::Center);

        frame.render_widget(footer_block, area);
        frame.render_widget(footer, footer_inner);
    }
}

fn hint_line(text: &str) -> Line<'static> {
    let t = theme();
    let mut spans = Vec::new();
    for (i, part) in text.split(" | ").enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", t.muted_style()));
        }
        match part.split_once(": ") {
            Some((keys, label)) => {
                spans.push(Span::styled(
                    format!("{keys}: "),
                    t.title_style(),
                ));
                spans.push(Span::styled(label.to_string(), t.text_style()));
            }
            None => spans.push(Span::styled(part.to_string(), t.text_style())),
        }
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_line_splits_keys_and_labels() {
        let line = hint_line("Enter: Confirm | Esc: Back");
        let text: Vec<String> = line.spans.iter().map(|s| s.content.to_string()).collect();
        assert_eq!(text, vec!["Enter: ", "Confirm", " | ", "Esc: ", "Back"]);
    }
}
