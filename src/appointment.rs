//! Building outbound appointment requests.

use crate::models::{AppointmentRequest, MAX_HOUR};
use chrono::{NaiveDate, NaiveDateTime};

/// Timestamp for a booking on `date` at `hour`, with minutes and seconds zeroed.
///
/// Returns `None` for hours outside 0..=23.
pub fn appointment_timestamp(date: NaiveDate, hour: u8) -> Option<NaiveDateTime> {
    if hour > MAX_HOUR {
        return None;
    }
    date.and_hms_opt(u32::from(hour), 0, 0)
}

/// Request body for booking `provider_id` on `date` at `hour`.
pub fn build_request(provider_id: &str, date: NaiveDate, hour: u8) -> Option<AppointmentRequest> {
    Some(AppointmentRequest {
        provider_id: provider_id.to_string(),
        date: appointment_timestamp(date, hour)?,
    })
}

/// Long form shown on the confirmation screen, e.g. "Sunday, March 10, 2024 at 09:00".
pub fn format_confirmation(date: &NaiveDateTime) -> String {
    date.format("%A, %B %-d, %Y at %H:00").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn test_timestamp_zeroes_minutes() {
        let ts = appointment_timestamp(march_10(), 9).unwrap();
        assert_eq!(ts.format("%Y-%m-%dT%H:%M:%S").to_string(), "2024-03-10T09:00:00");
    }

    #[test]
    fn test_timestamp_rejects_bad_hour() {
        assert!(appointment_timestamp(march_10(), 24).is_none());
        assert!(appointment_timestamp(march_10(), 23).is_some());
    }

    #[test]
    fn test_build_request() {
        let request = build_request("p1", march_10(), 9).unwrap();
        assert_eq!(request.provider_id, "p1");
        assert_eq!(request.date, march_10().and_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_format_confirmation() {
        let ts = appointment_timestamp(march_10(), 9).unwrap();
        assert_eq!(format_confirmation(&ts), "Sunday, March 10, 2024 at 09:00");
    }
}
