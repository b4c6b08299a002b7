//! The start/end pair a dial is bound to

use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use chrono_tz::Tz;

use crate::mapping::{minute_of_day, with_minute_of_day};

/// A selected time range in one zone
///
/// `end` may be on a later calendar day than `start`; the dial controller keeps
/// `end - start` equal to the duration shown on the dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Length in whole minutes, never negative
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes().max(0)
    }

    /// Length as read on the local clock, in whole minutes, never negative
    ///
    /// Differs from `duration_minutes` when the window spans a DST change.
    pub fn wall_minutes(&self) -> i64 {
        (self.end.naive_local() - self.start.naive_local())
            .num_minutes()
            .max(0)
    }

    /// Move both ends by the same amount
    pub fn shifted(&self, delta: Duration) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    /// Keep the end's clock time on `date` and the duration, moving the start
    ///
    /// Returns `None` if the end's clock time does not exist on that date.
    pub fn anchored_to(&self, date: NaiveDate) -> Option<Self> {
        let tz = self.end.timezone();
        let reference = date.and_hms_opt(12, 0, 0)?;
        let reference = tz.from_local_datetime(&reference).earliest()?;
        let end = with_minute_of_day(&reference, minute_of_day(&self.end))?;
        Some(Self {
            start: end - self.duration(),
            end,
        })
    }

    /// Default sleep window: 23:00 the day before `now` to 07:00 on `now`'s date
    pub fn sleep_default(now: &DateTime<Tz>) -> Self {
        let end = with_minute_of_day(now, 7 * 60).unwrap_or(*now);
        Self {
            start: end - Duration::hours(8),
            end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::{America::New_York, UTC};

    #[test]
    fn test_duration_and_shift() {
        let start = UTC.with_ymd_and_hms(2025, 6, 1, 22, 0, 0).unwrap();
        let end = UTC.with_ymd_and_hms(2025, 6, 2, 7, 0, 0).unwrap();
        let window = TimeWindow::new(start, end);
        assert_eq!(window.duration_minutes(), 540);

        let shifted = window.shifted(Duration::minutes(30));
        assert_eq!(shifted.duration_minutes(), 540);
        assert_eq!(shifted.start, UTC.with_ymd_and_hms(2025, 6, 1, 22, 30, 0).unwrap());
    }

    #[test]
    fn test_wall_minutes_across_spring_forward() {
        let start = New_York.with_ymd_and_hms(2025, 3, 8, 22, 0, 0).unwrap();
        let end = New_York.with_ymd_and_hms(2025, 3, 9, 7, 0, 0).unwrap();
        let window = TimeWindow::new(start, end);
        assert_eq!(window.duration_minutes(), 480);
        assert_eq!(window.wall_minutes(), 540);
    }

    #[test]
    fn test_negative_window_reports_zero() {
        let start = UTC.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        let end = UTC.with_ymd_and_hms(2025, 6, 1, 7, 0, 0).unwrap();
        assert_eq!(TimeWindow::new(start, end).duration_minutes(), 0);
    }

    #[test]
    fn test_anchor_to_wake_date() {
        let start = UTC.with_ymd_and_hms(2025, 6, 1, 23, 0, 0).unwrap();
        let end = UTC.with_ymd_and_hms(2025, 6, 2, 7, 15, 0).unwrap();
        let window = TimeWindow::new(start, end);

        let wake = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let anchored = window.anchored_to(wake).unwrap();
        assert_eq!(anchored.end, UTC.with_ymd_and_hms(2025, 6, 10, 7, 15, 0).unwrap());
        assert_eq!(anchored.start, UTC.with_ymd_and_hms(2025, 6, 9, 23, 0, 0).unwrap());
    }

    #[test]
    fn test_anchor_into_dst_gap_is_rejected() {
        let start = New_York.with_ymd_and_hms(2025, 3, 1, 23, 0, 0).unwrap();
        let end = New_York.with_ymd_and_hms(2025, 3, 2, 2, 30, 0).unwrap();
        let window = TimeWindow::new(start, end);
        let gap_day = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert!(window.anchored_to(gap_day).is_none());
    }

    #[test]
    fn test_sleep_default() {
        let now = UTC.with_ymd_and_hms(2025, 6, 2, 13, 45, 0).unwrap();
        let window = TimeWindow::sleep_default(&now);
        assert_eq!(window.start, UTC.with_ymd_and_hms(2025, 6, 1, 23, 0, 0).unwrap());
        assert_eq!(window.end, UTC.with_ymd_and_hms(2025, 6, 2, 7, 0, 0).unwrap());
    }
}
