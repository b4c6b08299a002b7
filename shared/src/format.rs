//! Display formatting for dial labels
//!
//! The dial itself never decides how a time reads on screen; it asks a
//! `TimeFormatter` supplied by the caller.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

use crate::window::TimeWindow;

/// Turns a handle time into the text shown next to it
pub trait TimeFormatter {
    fn format(&self, time: &DateTime<Tz>) -> String;
}

impl<F> TimeFormatter for F
where
    F: Fn(&DateTime<Tz>) -> String,
{
    fn format(&self, time: &DateTime<Tz>) -> String {
        self(time)
    }
}

/// 24-hour "HH:MM"
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockFormatter;

impl TimeFormatter for ClockFormatter {
    fn format(&self, time: &DateTime<Tz>) -> String {
        time.format("%H:%M").to_string()
    }
}

/// Names the day of a time relative to `today`
#[derive(Debug, Clone, Copy)]
pub struct RelativeDayFormatter {
    pub today: NaiveDate,
}

impl RelativeDayFormatter {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl TimeFormatter for RelativeDayFormatter {
    fn format(&self, time: &DateTime<Tz>) -> String {
        let date = time.date_naive();
        match (date - self.today).num_days() {
            0 => "Today".to_string(),
            -1 => "Yesterday".to_string(),
            1 => "Tomorrow".to_string(),
            _ => date.format("%b %-d").to_string(),
        }
    }
}

/// "1h 05m" style duration, or just "45m" below an hour
pub fn format_duration(minutes: i64) -> String {
    let minutes = minutes.max(0);
    let (h, m) = (minutes / 60, minutes % 60);
    if h > 0 {
        format!("{}h {:02}m", h, m)
    } else {
        format!("{}m", m)
    }
}

/// "HH:MM - HH:MM" summary of a window
pub fn format_range(window: &TimeWindow) -> String {
    let clock = ClockFormatter;
    format!("{} - {}", clock.format(&window.start), clock.format(&window.end))
}
