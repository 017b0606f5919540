//! Display formatting for workout dates

use std::fmt::Display;

use chrono::{DateTime, NaiveDate, TimeZone};

/// `Jan 5, 2024`
pub fn format_workout_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `Jan 5, 2024, 02:30 PM` in the timestamp's own zone
pub fn format_timestamp<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.format("%b %-d, %Y, %I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_workout_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_workout_date(date), "Jan 5, 2024");

        let date = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
        assert_eq!(format_workout_date(date), "Dec 25, 2023");
    }

    #[test]
    fn test_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 5, 14, 30, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "Jan 5, 2024, 02:30 PM");

        let morning = Utc.with_ymd_and_hms(2024, 7, 9, 9, 5, 0).unwrap();
        assert_eq!(format_timestamp(&morning), "Jul 9, 2024, 09:05 AM");
    }

    #[test]
    fn test_timestamp_uses_its_offset() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let ts = Utc
            .with_ymd_and_hms(2024, 1, 5, 23, 0, 0)
            .unwrap()
            .with_timezone(&offset);
        assert_eq!(format_timestamp(&ts), "Jan 6, 2024, 01:00 AM");
    }
}
