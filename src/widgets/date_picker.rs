//! Month calendar for choosing the appointment date.
//!
//! The picker moves a cursor date; the screen only adopts it when the user
//! confirms, so browsing months does not fire availability requests.

use crate::styles::theme;
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePickerState {
    cursor: NaiveDate,
    today: NaiveDate,
}

impl DatePickerState {
    pub fn new(cursor: NaiveDate, today: NaiveDate) -> Self {
        Self { cursor, today }
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    /// Move by `days`, which may be negative. Out-of-range dates are ignored.
    pub fn move_days(&mut self, days: i64) {
        let moved = if days >= 0 {
            self.cursor.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.cursor.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(date) = moved {
            self.cursor = date;
        }
    }

    pub fn move_weeks(&mut self, weeks: i64) {
        self.move_days(weeks * 7);
    }

    /// Same day in another month, clamped to that month's last day.
    pub fn move_months(&mut self, months: i32) {
        let moved = if months >= 0 {
            self.cursor.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.cursor.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        if let Some(date) = moved {
            self.cursor = date;
        }
    }
}

/// First day of the month containing `date`.
fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Rows of the month grid, Sunday first, `None` for padding cells.
pub fn month_grid(date: NaiveDate) -> Vec<[Option<NaiveDate>; 7]> {
    let first = month_start(date);
    let offset = first.weekday().num_days_from_sunday() as usize;
    let mut rows = Vec::new();
    let mut row = [None; 7];
    let mut col = offset;
    let mut day = Some(first);

    while let Some(current) = day {
        if current.month() != first.month() {
            break;
        }
        row[col] = Some(current);
        col += 1;
        if col == 7 {
            rows.push(row);
            row = [None; 7];
            col = 0;
        }
        day = current.succ_opt();
    }
    if col > 0 {
        rows.push(row);
    }
    rows
}

pub struct DatePicker<'a> {
    state: &'a DatePickerState,
    selected: NaiveDate,
}

impl<'a> DatePicker<'a> {
    pub fn new(state: &'a DatePickerState, selected: NaiveDate) -> Self {
        Self { state, selected }
    }
}

impl Widget for DatePicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let t = theme();
        let cursor = self.state.cursor;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style())
            .title(Line::from(format!(" {} ", cursor.format("%B %Y"))).centered())
            .title_style(t.title_style());

        let mut lines = vec![Line::from(
            [
                Weekday::Sun,
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
            ]
            .iter()
            .map(|d| Span::styled(format!(" {:<3}", &d.to_string()[..2]), t.muted_style()))
            .collect::<Vec<_>>(),
        )];

        for week in month_grid(cursor) {
            let spans: Vec<Span> = week
                .iter()
                .map(|cell| match cell {
                    None => Span::raw("    "),
                    Some(day) => {
                        let style = if *day == cursor {
                            t.highlight_style()
                        } else if *day == self.selected {
                            t.selected_style()
                        } else if *day < self.state.today {
                            t.disabled_style()
                        } else {
                            t.text_style()
                        };
                        Span::styled(format!(" {:>2} ", day.day()), style)
                    }
                })
                .collect();
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_moves_by_day_week_month() {
        let mut state = DatePickerState::new(date(2024, 3, 10), date(2024, 3, 1));
        state.move_days(1);
        assert_eq!(state.cursor(), date(2024, 3, 11));
        state.move_weeks(-2);
        assert_eq!(state.cursor(), date(2024, 2, 26));
        state.move_months(1);
        assert_eq!(state.cursor(), date(2024, 3, 26));
    }

    #[test]
    fn test_month_move_clamps_to_last_day() {
        let mut state = DatePickerState::new(date(2024, 1, 31), date(2024, 1, 1));
        state.move_months(1);
        assert_eq!(state.cursor(), date(2024, 2, 29));
        state.move_months(-1);
        assert_eq!(state.cursor(), date(2024, 1, 29));
    }

    #[test]
    fn test_month_grid_layout() {
        // March 2024 starts on a Friday and has 31 days
        let grid = month_grid(date(2024, 3, 10));
        assert_eq!(grid.len(), 6);
        assert_eq!(grid[0][5], Some(date(2024, 3, 1)));
        assert_eq!(grid[0][4], None);
        assert_eq!(grid[2][0], Some(date(2024, 3, 10)));
        assert_eq!(grid[5][0], Some(date(2024, 3, 31)));
        let days: usize = grid.iter().map(|w| w.iter().flatten().count()).sum();
        assert_eq!(days, 31);
    }

    #[test]
    fn test_render_shows_month_title() {
        let state = DatePickerState::new(date(2024, 3, 10), date(2024, 3, 1));
        let area = Rect::new(0, 0, 32, 10);
        let mut buf = Buffer::empty(area);
        DatePicker::new(&state, date(2024, 3, 10)).render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("March 2024"));
    }
}
