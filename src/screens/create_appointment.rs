//! Booking screen: pick a hairdresser, a day and an hour, then schedule.
//!
//! Changing the provider or the date fetches that day's availability. Only the
//! response for the latest provider/date pair is ever applied. A failed
//! submission shows an alert and leaves every selection as it was.

use crate::api::RequestError;
use crate::appointment::build_request;
use crate::availability::{DayAvailability, DayPeriod, HourSelection, HourSlot};
use crate::components::{Footer, Header};
use crate::keymap::Action;
use crate::models::{AppointmentRequest, AvailabilitySlot, Provider};
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::services::LatestRequest;
use crate::styles::theme;
use crate::ui::Route;
use crate::utils::{center_popup, create_standard_layout};
use crate::widgets::{DatePicker, DatePickerState};
use anyhow::Result;
use chrono::{Days, NaiveDate};
use crossterm::event::{Event, KeyEventKind};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

pub const CREATE_ERROR_TITLE: &str = "Error creating appointment";
const CREATE_ERROR_MESSAGE: &str = "An error occurred while creating the appointment. Please try again.";
pub const NO_HOUR_NOTICE: &str = "Select an hour before scheduling";
const AVAILABILITY_LOAD_ERROR: &str = "Could not load availability";

/// Focusable areas, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Providers,
    Date,
    Hours,
    Submit,
}

impl Focus {
    const ORDER: [Focus; 4] = [Focus::Providers, Focus::Date, Focus::Hours, Focus::Submit];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

pub struct CreateAppointmentScreen {
    provider_id: String,
    providers: Vec<Provider>,
    date: NaiveDate,
    today: NaiveDate,
    picker: Option<DatePickerState>,
    availability: DayAvailability,
    availability_error: Option<String>,
    hour_cursor: usize,
    selection: HourSelection,
    focus: Focus,
    notice: Option<String>,
    providers_request: LatestRequest<Result<Vec<Provider>, RequestError>>,
    availability_request: LatestRequest<Result<Vec<AvailabilitySlot>, RequestError>>,
    submit_request: LatestRequest<Result<(), RequestError>>,
    submitted: Option<AppointmentRequest>,
}

impl CreateAppointmentScreen {
    /// Opens on `provider_id` and `today`.
    pub fn new(provider_id: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            provider_id: provider_id.into(),
            providers: Vec::new(),
            date: today,
            today,
            picker: None,
            availability: DayAvailability::default(),
            availability_error: None,
            hour_cursor: 0,
            selection: HourSelection::new(),
            focus: Focus::Hours,
            notice: None,
            providers_request: LatestRequest::new("providers"),
            availability_request: LatestRequest::new("day-availability"),
            submit_request: LatestRequest::new("create-appointment"),
            submitted: None,
        }
    }

    pub fn selected_provider(&self) -> &str {
        &self.provider_id
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.date
    }

    pub fn selected_hour(&self) -> Option<u8> {
        self.selection.hour()
    }

    pub fn availability(&self) -> &DayAvailability {
        &self.availability
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submit_request.is_pending()
    }

    /// Number of availability requests started so far.
    pub fn availability_generation(&self) -> u64 {
        self.availability_request.generation()
    }

    /// Availability does not gate selection.
    pub fn select_hour(&mut self, hour: u8) {
        self.selection.select(hour);
        self.notice = None;
        if let Some(index) = self.availability.iter().position(|s| s.hour == hour) {
            self.hour_cursor = index;
        }
    }

    /// Replace the day's slots, keeping the cursor on the selected hour when present.
    pub fn set_availability(&mut self, slots: &[AvailabilitySlot]) {
        self.availability = DayAvailability::from_slots(slots);
        self.availability_error = None;
        self.hour_cursor = self
            .selection
            .hour()
            .and_then(|h| self.availability.iter().position(|s| s.hour == h))
            .unwrap_or(0);
    }

    pub fn set_providers(&mut self, providers: Vec<Provider>) {
        self.providers = providers;
    }

    fn provider_name(&self) -> String {
        self.providers
            .iter()
            .find(|p| p.id == self.provider_id)
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }

    fn load_providers(&mut self, ctx: &ScreenContext) {
        let api = ctx.api.clone();
        self.providers_request.start(ctx.runtime, async move { api.providers().await });
    }

    fn load_availability(&mut self, ctx: &ScreenContext) {
        let api = ctx.api.clone();
        let provider_id = self.provider_id.clone();
        let date = self.date;
        self.availability = DayAvailability::default();
        self.availability_error = None;
        self.availability_request.start(ctx.runtime, async move {
            api.day_availability(&provider_id, date).await
        });
    }

    /// Switch provider and refetch availability. No-op for the current one.
    pub fn change_provider(&mut self, provider_id: &str, ctx: &ScreenContext) {
        if provider_id == self.provider_id {
            return;
        }
        info!("Selected provider {}", provider_id);
        self.provider_id = provider_id.to_string();
        self.load_availability(ctx);
    }

    /// Switch date and refetch availability. No-op for the current one.
    pub fn change_date(&mut self, date: NaiveDate, ctx: &ScreenContext) {
        if date == self.date {
            return;
        }
        info!("Selected date {}", date);
        self.date = date;
        self.load_availability(ctx);
    }

    fn step_provider(&mut self, delta: isize, ctx: &ScreenContext) {
        if self.providers.is_empty() {
            return;
        }
        let current = self
            .providers
            .iter()
            .position(|p| p.id == self.provider_id)
            .unwrap_or(0) as isize;
        let last = self.providers.len() as isize - 1;
        let index = (current + delta).clamp(0, last) as usize;
        let id = self.providers[index].id.clone();
        self.change_provider(&id, ctx);
    }

    fn step_date(&mut self, days: i64, ctx: &ScreenContext) {
        let moved = if days >= 0 {
            self.date.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.date.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(date) = moved {
            self.change_date(date, ctx);
        }
    }

    /// Move the hour cursor between morning and afternoon rows, keeping the column.
    fn step_period(&mut self, target: DayPeriod) {
        let in_morning = self.hour_cursor < self.availability.morning.len();
        let column = if in_morning {
            self.hour_cursor
        } else {
            self.hour_cursor - self.availability.morning.len()
        };
        let (row_len, start) = match target {
            DayPeriod::Morning => (self.availability.morning.len(), 0),
            DayPeriod::Afternoon => (self.availability.afternoon.len(), self.availability.morning.len()),
        };
        if row_len > 0 && self.availability.first_index_of(target).is_some() {
            self.hour_cursor = start + column.min(row_len - 1);
        }
    }

    fn move_hour_cursor(&mut self, delta: isize) {
        let len = self.availability.len();
        if len == 0 {
            return;
        }
        let next = (self.hour_cursor as isize + delta).clamp(0, len as isize - 1);
        self.hour_cursor = next as usize;
    }

    fn submit(&mut self, ctx: &ScreenContext) {
        if self.submit_request.is_pending() {
            return;
        }
        let Some(hour) = self.selection.hour() else {
            self.notice = Some(NO_HOUR_NOTICE.to_string());
            return;
        };
        let Some(request) = build_request(&self.provider_id, self.date, hour) else {
            self.notice = Some(NO_HOUR_NOTICE.to_string());
            return;
        };
        self.notice = None;

        let api = ctx.api.clone();
        let body = request.clone();
        self.submitted = Some(request);
        self.submit_request
            .start(ctx.runtime, async move { api.create_appointment(&body).await });
    }

    /// Turn the outcome of `POST /appointments` into the next action.
    ///
    /// Failure leaves provider, date and hour untouched.
    pub fn handle_submission_result(
        &mut self,
        request: &AppointmentRequest,
        result: Result<(), RequestError>,
    ) -> ScreenAction {
        match result {
            Ok(()) => {
                info!("Appointment created for {}", request.date);
                ScreenAction::Navigate(Route::AppointmentCreated {
                    date: request.date,
                    provider_name: self.provider_name(),
                })
            }
            Err(e) => {
                warn!("Failed to create appointment: {}", e);
                ScreenAction::alert(CREATE_ERROR_TITLE, CREATE_ERROR_MESSAGE)
            }
        }
    }

    fn handle_picker_action(&mut self, action: Action, ctx: &ScreenContext) {
        let Some(picker) = self.picker.as_mut() else {
            return;
        };
        match action {
            Action::MoveLeft => picker.move_days(-1),
            Action::MoveRight => picker.move_days(1),
            Action::MoveUp => picker.move_weeks(-1),
            Action::MoveDown => picker.move_weeks(1),
            Action::PageUp => picker.move_months(-1),
            Action::PageDown => picker.move_months(1),
            Action::Confirm | Action::Select | Action::ToggleDatePicker => {
                let date = picker.cursor();
                self.picker = None;
                self.change_date(date, ctx);
            }
            Action::Cancel => self.picker = None,
            _ => {}
        }
    }

    fn toggle_picker(&mut self) {
        self.focus = Focus::Date;
        self.picker = match self.picker {
            Some(_) => None,
            None => Some(DatePickerState::new(self.date, self.today)),
        };
    }

    fn render_providers(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let mut spans = Vec::new();
        for provider in &self.providers {
            let style = if provider.id == self.provider_id {
                t.selected_style()
            } else {
                t.text_style()
            };
            spans.push(Span::styled(format!(" {} ", provider.name), style));
            spans.push(Span::raw("  "));
        }
        if spans.is_empty() {
            spans.push(Span::styled("Loading hairdressers...", t.muted_style()));
        }
        let block = focus_block("Hairdresser", self.focus == Focus::Providers);
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn render_date(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let t = theme();
        let line = Line::from(vec![
            Span::styled(self.date.format("%A, %B %-d, %Y").to_string(), t.text_style()),
            Span::styled(
                format!("   {}: pick another date", ctx.config.keymap.key_for(Action::ToggleDatePicker)),
                t.muted_style(),
            ),
        ]);
        let block = focus_block("Choose the date", self.focus == Focus::Date);
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn hour_span(&self, index: usize, slot: &HourSlot) -> Span<'static> {
        let t = theme();
        let style = if self.focus == Focus::Hours && index == self.hour_cursor {
            t.highlight_style()
        } else if self.selection.is_selected(slot.hour) {
            t.selected_style()
        } else if !slot.available {
            t.disabled_style()
        } else {
            t.text_style()
        };
        Span::styled(format!(" {} ", slot.label), style)
    }

    fn render_hours(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let block = focus_block("Choose the time", self.focus == Focus::Hours);

        let lines = if let Some(error) = &self.availability_error {
            vec![Line::styled(error.clone(), t.error_style())]
        } else if self.availability.is_empty() {
            let text = if self.availability_request.is_pending() {
                "Loading..."
            } else {
                "No hours for this day"
            };
            vec![Line::styled(text, t.muted_style())]
        } else {
            let mut lines = Vec::new();
            let mut index = 0;
            for (period, slots) in [
                (DayPeriod::Morning, &self.availability.morning),
                (DayPeriod::Afternoon, &self.availability.afternoon),
            ] {
                lines.push(Line::styled(period.title(), t.muted_style()));
                let mut spans = Vec::new();
                for slot in slots {
                    spans.push(self.hour_span(index, slot));
                    spans.push(Span::raw(" "));
                    index += 1;
                }
                lines.push(Line::from(spans));
                lines.push(Line::default());
            }
            lines
        };

        frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
    }

    fn render_submit(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let label = if self.submit_request.is_pending() {
            "Scheduling..."
        } else {
            "Schedule"
        };
        let style = if self.focus == Focus::Submit {
            t.selected_style()
        } else {
            t.title_style()
        };
        let block = focus_block("", self.focus == Focus::Submit);
        frame.render_widget(
            Paragraph::new(Line::styled(label, style)).centered().block(block),
            area,
        );
    }
}

fn focus_block(title: &str, focused: bool) -> Block<'static> {
    let t = theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            t.border_focused_style()
        } else {
            t.border_style()
        });
    if title.is_empty() {
        block
    } else {
        block.title(format!(" {} ", title)).title_style(t.title_style())
    }
}

impl Screen for CreateAppointmentScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let (header, body, footer) = create_standard_layout(area, Header::HEIGHT, Footer::HEIGHT);
        Header::render(frame, header, "Hairdressers", ctx.auth.user().map(|u| u.name.as_str()));

        let [providers, date, hours, notice, submit] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .areas(body);

        self.render_providers(frame, providers);
        self.render_date(frame, date, ctx);
        self.render_hours(frame, hours);
        if let Some(text) = &self.notice {
            frame.render_widget(Paragraph::new(Line::styled(text.clone(), t.warning_style())), notice);
        }
        self.render_submit(frame, submit);

        if let Some(picker) = &self.picker {
            let popup = center_popup(body, 32, 10);
            frame.render_widget(Clear, popup);
            frame.render_widget(DatePicker::new(picker, self.date), popup);
        }

        let hints = if self.picker.is_some() {
            ctx.config
                .keymap
                .hints(&[Action::MoveLeft, Action::MoveUp, Action::PageDown, Action::Confirm, Action::Cancel])
        } else {
            ctx.config.keymap.hints(&[
                Action::NextField,
                Action::Select,
                Action::ToggleDatePicker,
                Action::Submit,
                Action::Cancel,
            ])
        };
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
        let Some(action) = ctx.config.keymap.action_for(&key) else {
            return Ok(ScreenAction::None);
        };

        if self.picker.is_some() {
            self.handle_picker_action(action, ctx);
            return Ok(ScreenAction::None);
        }

        match action {
            // A booking in flight must deliver its confirmation or alert
            Action::Cancel if self.is_submitting() => {}
            Action::Cancel => return Ok(ScreenAction::GoBack),
            Action::Quit => return Ok(ScreenAction::Quit),
            Action::NextField => self.focus = self.focus.next(),
            Action::PrevField => self.focus = self.focus.prev(),
            Action::ToggleDatePicker => self.toggle_picker(),
            Action::Submit => self.submit(ctx),
            _ => match self.focus {
                Focus::Providers => match action {
                    Action::MoveLeft | Action::MoveUp => self.step_provider(-1, ctx),
                    Action::MoveRight | Action::MoveDown => self.step_provider(1, ctx),
                    _ => {}
                },
                Focus::Date => match action {
                    Action::MoveLeft => self.step_date(-1, ctx),
                    Action::MoveRight => self.step_date(1, ctx),
                    Action::Confirm | Action::Select => self.toggle_picker(),
                    _ => {}
                },
                Focus::Hours => match action {
                    Action::MoveLeft => self.move_hour_cursor(-1),
                    Action::MoveRight => self.move_hour_cursor(1),
                    Action::MoveUp => self.step_period(DayPeriod::Morning),
                    Action::MoveDown => self.step_period(DayPeriod::Afternoon),
                    Action::Confirm | Action::Select => {
                        if let Some(hour) = self.availability.get(self.hour_cursor).map(|s| s.hour) {
                            self.select_hour(hour);
                        }
                    }
                    _ => {}
                },
                Focus::Submit => {
                    if matches!(action, Action::Confirm | Action::Select) {
                        self.submit(ctx);
                    }
                }
            },
        }
        Ok(ScreenAction::None)
    }

    fn tick(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        if let Some(result) = self.providers_request.poll() {
            match result {
                Ok(providers) => self.set_providers(providers),
                Err(e) => warn!("Failed to load providers: {}", e),
            }
        }

        if let Some(result) = self.availability_request.poll() {
            match result {
                Ok(slots) => self.set_availability(&slots),
                Err(e) => {
                    warn!("Failed to load availability: {}", e);
                    self.availability_error = Some(AVAILABILITY_LOAD_ERROR.to_string());
                }
            }
        }

        if let Some(result) = self.submit_request.poll() {
            if let Some(request) = self.submitted.take() {
                return Ok(self.handle_submission_result(&request, result));
            }
        }
        Ok(ScreenAction::None)
    }

    fn on_enter(&mut self, ctx: &ScreenContext) -> Result<()> {
        if self.providers.is_empty() {
            self.load_providers(ctx);
        }
        if self.availability.is_empty() && !self.availability_request.is_pending() {
            self.load_availability(ctx);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn slots() -> Vec<AvailabilitySlot> {
        [(8, true), (9, false), (10, true), (13, true), (14, true)]
            .into_iter()
            .map(|(hour, available)| AvailabilitySlot { hour, available })
            .collect()
    }

    #[test]
    fn test_starts_on_given_provider_and_today_without_hour() {
        let screen = CreateAppointmentScreen::new("p1", today());
        assert_eq!(screen.selected_provider(), "p1");
        assert_eq!(screen.selected_date(), today());
        assert_eq!(screen.selected_hour(), None);
        assert_eq!(screen.focus(), Focus::Hours);
    }

    #[test]
    fn test_unavailable_hour_is_selectable_and_latest_wins() {
        let mut screen = CreateAppointmentScreen::new("p1", today());
        screen.set_availability(&slots());
        screen.select_hour(9);
        assert_eq!(screen.selected_hour(), Some(9));
        screen.select_hour(14);
        assert_eq!(screen.selected_hour(), Some(14));
        assert_eq!(screen.hour_cursor, 4);
    }

    #[test]
    fn test_period_navigation_keeps_column() {
        let mut screen = CreateAppointmentScreen::new("p1", today());
        screen.set_availability(&slots());
        screen.move_hour_cursor(2);
        screen.step_period(DayPeriod::Afternoon);
        assert_eq!(screen.availability().get(screen.hour_cursor).map(|s| s.hour), Some(14));
        screen.step_period(DayPeriod::Morning);
        assert_eq!(screen.availability().get(screen.hour_cursor).map(|s| s.hour), Some(9));
    }

    #[test]
    fn test_selection_survives_new_availability() {
        let mut screen = CreateAppointmentScreen::new("p1", today());
        screen.set_availability(&slots());
        screen.select_hour(13);
        screen.set_availability(&[AvailabilitySlot { hour: 13, available: false }]);
        assert_eq!(screen.selected_hour(), Some(13));
        assert_eq!(screen.hour_cursor, 0);
    }

    #[test]
    fn test_success_navigates_with_timestamp_and_provider_name() {
        let mut screen = CreateAppointmentScreen::new("p1", today());
        screen.set_providers(vec![Provider {
            id: "p1".into(),
            name: "Ana".into(),
            avatar_url: None,
        }]);
        let request = build_request("p1", today(), 9).unwrap();
        let action = screen.handle_submission_result(&request, Ok(()));
        match action {
            ScreenAction::Navigate(Route::AppointmentCreated { date, provider_name }) => {
                assert_eq!(date.format("%Y-%m-%dT%H:%M:%S").to_string(), "2024-03-10T09:00:00");
                assert_eq!(provider_name, "Ana");
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_failure_alerts_and_keeps_state() {
        let mut screen = CreateAppointmentScreen::new("p1", today());
        screen.set_availability(&slots());
        screen.select_hour(10);
        let request = build_request("p1", today(), 10).unwrap();

        let action = screen.handle_submission_result(
            &request,
            Err(RequestError::Status {
                status: StatusCode::BAD_REQUEST,
                body: "This appointment is already booked".into(),
            }),
        );

        assert!(matches!(
            action,
            ScreenAction::ShowAlert { ref title, .. } if title == CREATE_ERROR_TITLE
        ));
        assert_eq!(screen.selected_provider(), "p1");
        assert_eq!(screen.selected_date(), today());
        assert_eq!(screen.selected_hour(), Some(10));
    }

    #[test]
    fn test_focus_cycles() {
        assert_eq!(Focus::Submit.next(), Focus::Providers);
        assert_eq!(Focus::Providers.prev(), Focus::Submit);
        assert_eq!(Focus::Date.next(), Focus::Hours);
    }
}
