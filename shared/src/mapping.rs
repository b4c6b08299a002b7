//! Angle ↔ wall-clock time mapping
//!
//! Angle 0° represents `base_offset` minutes after midnight. A time is folded
//! onto the dial by taking its position modulo the scale's span, so on the
//! one-hour dial 10:15 and 14:15 share an angle.

use chrono::{DateTime, Duration, LocalResult, TimeZone, Timelike};
use chrono_tz::Tz;

use crate::scale::TimeScale;

pub const MINUTES_PER_DAY: u32 = 1440;

/// Minute of day (0-1439) of a zoned time
pub fn minute_of_day(time: &DateTime<Tz>) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Dial angle for a time
pub fn time_to_angle(time: &DateTime<Tz>, scale: TimeScale, base_offset: u32) -> f64 {
    let total = scale.total_minutes() as i64;
    let relative = (minute_of_day(time) as i64 - base_offset as i64).rem_euclid(MINUTES_PER_DAY as i64);
    let folded = relative % total;
    folded as f64 / total as f64 * 360.0
}

/// Minutes from the dial origin to an angle
pub fn angle_to_minutes(angle: f64, scale: TimeScale) -> i64 {
    (angle / 360.0 * scale.total_minutes() as f64).round() as i64
}

/// Convert an angle change into the equivalent time change
pub fn angle_delta_to_duration(delta_degrees: f64, scale: TimeScale) -> Duration {
    let seconds = delta_degrees / 360.0 * scale.total_minutes() as f64 * 60.0;
    Duration::seconds(seconds.round() as i64)
}

/// Minute of day represented by an angle
///
/// In multi-lap mode the extra laps are added before wrapping to the day.
pub fn angle_to_minute_of_day(
    angle: f64,
    scale: TimeScale,
    base_offset: u32,
    extra_laps: u32,
    multi_lap: bool,
) -> u32 {
    let mut minutes = angle_to_minutes(angle, scale) + base_offset as i64;
    if multi_lap {
        minutes += extra_laps as i64 * scale.total_minutes() as i64;
    }
    minutes.rem_euclid(MINUTES_PER_DAY as i64) as u32
}

/// Same calendar date as `reference`, at `minute` minutes past midnight
///
/// Returns `None` when that local time is skipped or repeated in the zone.
pub fn with_minute_of_day(reference: &DateTime<Tz>, minute: u32) -> Option<DateTime<Tz>> {
    let minute = minute % MINUTES_PER_DAY;
    let naive = reference
        .date_naive()
        .and_hms_opt(minute / 60, minute % 60, 0)?;
    reference.timezone().from_local_datetime(&naive).single()
}

/// Move a time by `delta` on the local wall clock
///
/// Across a DST change the absolute distance differs from `delta`, but the
/// clock reading (and so the dial angle) moves by exactly `delta`. A result
/// inside a DST gap falls back to absolute arithmetic; a repeated local time
/// resolves to its earlier instant.
pub fn shift_wall_clock(time: &DateTime<Tz>, delta: Duration) -> Option<DateTime<Tz>> {
    let naive = time.naive_local().checked_add_signed(delta)?;
    match time.timezone().from_local_datetime(&naive) {
        LocalResult::Single(shifted) => Some(shifted),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            log::debug!("{} does not exist locally, shifting by absolute time", naive);
            time.checked_add_signed(delta)
        }
    }
}

/// End time for the end handle, read on the local wall clock
///
/// The dial origin is recovered from the start's clock time, then the end
/// offset is added. When the end angle sits behind the start angle the end is
/// on the next cycle; in single-lap mode coinciding handles mean a whole cycle.
/// Returns `None` only if the result is outside chrono's representable range.
pub fn end_time_for(
    start: &DateTime<Tz>,
    start_angle: f64,
    end_angle: f64,
    extra_laps: u32,
    scale: TimeScale,
    multi_lap: bool,
) -> Option<DateTime<Tz>> {
    let total = scale.total_minutes() as i64;
    let start_minutes = angle_to_minutes(start_angle, scale);
    let mut offset = angle_to_minutes(end_angle, scale);
    if offset < start_minutes || (!multi_lap && offset == start_minutes) {
        offset += total;
    }
    if multi_lap {
        offset += extra_laps as i64 * total;
    }
    shift_wall_clock(start, Duration::minutes(offset - start_minutes))
}
