use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::model::{activity::BookingActivity, participant::Participant, user::BookingUser};
use crate::model::id::{BookingId, ProductId};

pub mod event;

#[derive(Debug)]
pub struct Booking {
    pub id: BookingId,
    pub total_price: f64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub user: BookingUser,
    pub activity: BookingActivity,
    pub participants: Vec<Participant>,
    pub lines: Vec<BookingLine>,
}

/// One purchased product attached to a booking. The unit price is the
/// product's price as resolved at assembly time; the stored total on the
/// booking is not recomputed from it outside the creation path.
#[derive(Debug)]
pub struct BookingLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: i32,
}

impl BookingLine {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

pub fn total_of(lines: &[BookingLine]) -> f64 {
    lines.iter().map(BookingLine::line_total).sum()
}

/// A booking's reserved hours as shown in availability views. Derived, never
/// persisted.
#[derive(Debug, PartialEq, Eq)]
pub struct OccupiedTime {
    pub duration_hours: i64,
    pub start_hour: String,
}

impl OccupiedTime {
    /// Whole hours between start and end, partial hours discarded, and the
    /// start rendered as "H:00" regardless of the start's minutes.
    pub fn of(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            duration_hours: (end - start).num_hours(),
            start_hour: format!("{}:00", start.hour()),
        }
    }
}

impl From<&Booking> for OccupiedTime {
    fn from(value: &Booking) -> Self {
        Self::of(value.start_time, value.end_time)
    }
}

/// Inclusive bounds of one calendar day, upper bound at the maximum
/// representable time-of-day rather than the next midnight. A booking
/// spanning midnight therefore counts only towards its start day.
pub fn day_window(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(NaiveTime::MIN);
    let end = date.and_time(
        NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).expect("valid time-of-day"),
    );
    (start, end)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::rstest;

    use super::*;
    use crate::model::id::ProductId;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[rstest]
    #[case(at(10, 0), at(12, 0), 2, "10:00")]
    #[case(at(10, 0), at(11, 45), 1, "10:00")]
    #[case(at(14, 37), at(16, 0), 1, "14:00")]
    #[case(at(9, 30), at(10, 0), 0, "9:00")]
    fn occupied_time_truncates_hours_and_drops_minutes(
        #[case] start: NaiveDateTime,
        #[case] end: NaiveDateTime,
        #[case] duration_hours: i64,
        #[case] start_hour: &str,
    ) {
        let occupied = OccupiedTime::of(start, end);
        assert_eq!(occupied.duration_hours, duration_hours);
        assert_eq!(occupied.start_hour, start_hour);
    }

    #[test]
    fn day_window_is_inclusive_of_the_whole_day() {
        let (start, end) = day_window(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(start, at(0, 0));
        assert!(end < NaiveDate::from_ymd_opt(2024, 5, 2).unwrap().and_time(NaiveTime::MIN));
        assert!(end > at(23, 59));
    }

    #[test]
    fn total_sums_quantity_times_unit_price() {
        let lines = vec![
            BookingLine {
                product_id: ProductId::new(1),
                product_name: "Pepsi 33cl.".into(),
                unit_price: 20.0,
                quantity: 3,
            },
            BookingLine {
                product_id: ProductId::new(2),
                product_name: "Kim's Saltede Chips".into(),
                unit_price: 25.0,
                quantity: 1,
            },
        ];
        assert_eq!(lines[0].line_total(), 60.0);
        assert_eq!(total_of(&lines), 85.0);
    }

    #[test]
    fn total_of_no_lines_is_zero() {
        assert_eq!(total_of(&[]), 0.0);
    }
}
