//! Day availability grouping and hour selection.
//!
//! The API returns a flat list of hourly slots for one provider and one day.
//! The booking screen shows them in two sections, morning (before noon) and
//! afternoon, each slot labelled as `HH:00`.

use crate::models::AvailabilitySlot;

/// First hour that belongs to the afternoon section.
pub const NOON: u8 = 12;

/// An availability slot with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourSlot {
    pub hour: u8,
    pub available: bool,
    pub label: String,
}

impl From<&AvailabilitySlot> for HourSlot {
    fn from(slot: &AvailabilitySlot) -> Self {
        Self {
            hour: slot.hour,
            available: slot.available,
            label: format_hour(slot.hour),
        }
    }
}

/// Which section of the day a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    Morning,
    Afternoon,
}

impl DayPeriod {
    pub fn of(hour: u8) -> Self {
        if hour < NOON {
            DayPeriod::Morning
        } else {
            DayPeriod::Afternoon
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "Morning",
            DayPeriod::Afternoon => "Afternoon",
        }
    }
}

/// A day's slots split into morning and afternoon, each in API order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayAvailability {
    pub morning: Vec<HourSlot>,
    pub afternoon: Vec<HourSlot>,
}

impl DayAvailability {
    pub fn from_slots(slots: &[AvailabilitySlot]) -> Self {
        let mut day = Self::default();
        for slot in slots {
            match DayPeriod::of(slot.hour) {
                DayPeriod::Morning => day.morning.push(HourSlot::from(slot)),
                DayPeriod::Afternoon => day.afternoon.push(HourSlot::from(slot)),
            }
        }
        day
    }

    pub fn is_empty(&self) -> bool {
        self.morning.is_empty() && self.afternoon.is_empty()
    }

    pub fn len(&self) -> usize {
        self.morning.len() + self.afternoon.len()
    }

    /// All slots, morning first. Indexes here are what the hour cursor walks.
    pub fn iter(&self) -> impl Iterator<Item = &HourSlot> {
        self.morning.iter().chain(self.afternoon.iter())
    }

    pub fn get(&self, index: usize) -> Option<&HourSlot> {
        self.iter().nth(index)
    }

    /// Flat index of the first slot in `period`, if that section has any.
    pub fn first_index_of(&self, period: DayPeriod) -> Option<usize> {
        match period {
            DayPeriod::Morning if !self.morning.is_empty() => Some(0),
            DayPeriod::Afternoon if !self.afternoon.is_empty() => Some(self.morning.len()),
            _ => None,
        }
    }
}

/// Format an hour of the day as a 24-hour `HH:00` label.
pub fn format_hour(hour: u8) -> String {
    format!("{hour:02}:00")
}

/// The hour the user picked on the booking screen, if any.
///
/// Selection is not checked against availability; the API has the final say.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HourSelection {
    hour: Option<u8>,
}

impl HourSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, hour: u8) {
        self.hour = Some(hour);
    }

    pub fn clear(&mut self) {
        self.hour = None;
    }

    pub fn hour(&self) -> Option<u8> {
        self.hour
    }

    pub fn is_selected(&self, hour: u8) -> bool {
        self.hour == Some(hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(hour: u8, available: bool) -> AvailabilitySlot {
        AvailabilitySlot { hour, available }
    }

    #[test]
    fn test_format_hour_all_hours() {
        assert_eq!(format_hour(0), "00:00");
        assert_eq!(format_hour(9), "09:00");
        assert_eq!(format_hour(14), "14:00");
        assert_eq!(format_hour(23), "23:00");
        for hour in 0..=23u8 {
            assert_eq!(format_hour(hour), format!("{:02}:00", hour));
        }
    }

    #[test]
    fn test_partition_by_noon() {
        let slots: Vec<_> = (8..18).map(|h| slot(h, h % 2 == 0)).collect();
        let day = DayAvailability::from_slots(&slots);

        let morning: Vec<u8> = day.morning.iter().map(|s| s.hour).collect();
        let afternoon: Vec<u8> = day.afternoon.iter().map(|s| s.hour).collect();
        assert_eq!(morning, vec![8, 9, 10, 11]);
        assert_eq!(afternoon, vec![12, 13, 14, 15, 16, 17]);
        assert_eq!(day.len(), slots.len());
    }

    #[test]
    fn test_partition_is_total_and_keeps_order() {
        let slots = vec![slot(15, true), slot(3, false), slot(12, true), slot(11, true), slot(0, true)];
        let day = DayAvailability::from_slots(&slots);

        let morning: Vec<u8> = day.morning.iter().map(|s| s.hour).collect();
        let afternoon: Vec<u8> = day.afternoon.iter().map(|s| s.hour).collect();
        assert_eq!(morning, vec![3, 11, 0]);
        assert_eq!(afternoon, vec![15, 12]);

        for s in &slots {
            let in_morning = day.morning.iter().filter(|m| m.hour == s.hour).count();
            let in_afternoon = day.afternoon.iter().filter(|a| a.hour == s.hour).count();
            assert_eq!(in_morning + in_afternoon, 1);
            assert_eq!(in_morning == 1, s.hour < 12);
        }
    }

    #[test]
    fn test_partition_carries_flag_and_label() {
        let day = DayAvailability::from_slots(&[slot(9, false), slot(14, true)]);
        assert_eq!(
            day.morning[0],
            HourSlot { hour: 9, available: false, label: "09:00".to_string() }
        );
        assert_eq!(
            day.afternoon[0],
            HourSlot { hour: 14, available: true, label: "14:00".to_string() }
        );
    }

    #[test]
    fn test_empty_availability() {
        let day = DayAvailability::from_slots(&[]);
        assert!(day.is_empty());
        assert_eq!(day.first_index_of(DayPeriod::Morning), None);
        assert_eq!(day.first_index_of(DayPeriod::Afternoon), None);
    }

    #[test]
    fn test_flat_indexing() {
        let day = DayAvailability::from_slots(&[slot(10, true), slot(13, true), slot(16, true)]);
        assert_eq!(day.get(0).map(|s| s.hour), Some(10));
        assert_eq!(day.get(2).map(|s| s.hour), Some(16));
        assert_eq!(day.first_index_of(DayPeriod::Afternoon), Some(1));
        assert!(day.get(3).is_none());
    }

    #[test]
    fn test_selection_overwrites() {
        let mut selection = HourSelection::new();
        assert_eq!(selection.hour(), None);

        selection.select(9);
        selection.select(15);
        assert_eq!(selection.hour(), Some(15));
        assert!(selection.is_selected(15));
        assert!(!selection.is_selected(9));
    }

    #[test]
    fn test_unavailable_hour_can_be_selected() {
        let day = DayAvailability::from_slots(&[slot(10, false)]);
        let mut selection = HourSelection::new();
        let unavailable = &day.morning[0];
        selection.select(unavailable.hour);
        assert!(selection.is_selected(10));
    }

    #[test]
    fn test_midnight_is_a_real_selection() {
        let mut selection = HourSelection::new();
        assert!(!selection.is_selected(0));
        selection.select(0);
        assert_eq!(selection.hour(), Some(0));
        selection.clear();
        assert_eq!(selection.hour(), None);
    }
}
