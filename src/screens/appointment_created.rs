use crate::appointment::format_confirmation;
use crate::components::Footer;
use crate::keymap::Action;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::styles::theme;
use crate::ui::Route;
use crate::utils::create_standard_layout;
use anyhow::Result;
use chrono::NaiveDateTime;
use crossterm::event::{Event, KeyEventKind};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub const CREATED_TITLE: &str = "Appointment scheduled";

/// Confirmation shown after a successful booking.
pub struct AppointmentCreatedScreen {
    date: NaiveDateTime,
    provider_name: String,
}

impl AppointmentCreatedScreen {
    pub fn new(date: NaiveDateTime, provider_name: impl Into<String>) -> Self {
        Self {
            date,
            provider_name: provider_name.into(),
        }
    }

    pub fn message(&self) -> String {
        let when = format_confirmation(&self.date);
        if self.provider_name.is_empty() {
            when
        } else {
            format!("{} with {}", when, self.provider_name)
        }
    }
}

impl Screen for AppointmentCreatedScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let (_, body, footer) = create_standard_layout(area, 0, Footer::HEIGHT);

        let [_, content, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(5),
            Constraint::Fill(1),
        ])
        .areas(body);

        let lines = vec![
            Line::styled("\u{2714}", t.success_style()),
            Line::default(),
            Line::styled(CREATED_TITLE, t.title_style()),
            Line::default(),
            Line::styled(self.message(), t.muted_style()),
        ];
        frame.render_widget(Paragraph::new(lines).centered(), content);

        let hints = ctx.config.keymap.hints(&[Action::Confirm]);
        Footer::render(frame, footer, &hints);
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }
        Ok(match ctx.config.keymap.action_for(&key) {
            Some(Action::Confirm | Action::Select | Action::Cancel) => ScreenAction::ResetTo(Route::Dashboard),
            Some(Action::Quit) => ScreenAction::Quit,
            _ => ScreenAction::None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_message_includes_date_and_provider() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let screen = AppointmentCreatedScreen::new(date, "Ana");
        assert_eq!(screen.message(), "Sunday, March 10, 2024 at 09:00 with Ana");

        let anonymous = AppointmentCreatedScreen::new(date, "");
        assert_eq!(anonymous.message(), "Sunday, March 10, 2024 at 09:00");
    }
}
