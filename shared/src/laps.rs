//! Lap bookkeeping for selections longer than one revolution
//!
//! A crossing of the end handle over the start handle shows up as a jump of
//! the forward arc between consecutive samples: from near 360° to near 0°
//! (one lap more) or the other way round (one lap less).

use crate::angle::{arc_length, same_angle};
use crate::scale::TimeScale;

/// Arc above which a sample counts as "just before" the start handle
pub const LAP_HIGH_ARC: f64 = 270.0;
/// Arc below which a sample counts as "just past" the start handle
pub const LAP_LOW_ARC: f64 = 90.0;

/// Outcome of feeding one arc transition to the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LapChange {
    Unchanged,
    Added,
    Removed,
}

/// Number of additional full revolutions in the selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LapCounter {
    laps: u32,
}

impl LapCounter {
    pub fn new(laps: u32) -> Self {
        Self { laps }
    }

    pub fn laps(&self) -> u32 {
        self.laps
    }

    pub fn reset(&mut self) {
        self.laps = 0;
    }

    /// Compare the arc before and after a handle move
    ///
    /// Never drops below zero: a backward crossing with no laps left is
    /// ignored.
    pub fn observe(&mut self, old_arc: f64, new_arc: f64) -> LapChange {
        if old_arc > LAP_HIGH_ARC && new_arc < LAP_LOW_ARC {
            self.laps += 1;
            log::debug!("lap added ({:.2}° -> {:.2}°), laps = {}", old_arc, new_arc, self.laps);
            LapChange::Added
        } else if old_arc < LAP_LOW_ARC && new_arc > LAP_HIGH_ARC && self.laps > 0 {
            self.laps -= 1;
            log::debug!("lap removed ({:.2}° -> {:.2}°), laps = {}", old_arc, new_arc, self.laps);
            LapChange::Removed
        } else {
            LapChange::Unchanged
        }
    }
}

/// Forward arc of the selection with the per-mode degenerate policy
///
/// Coinciding handles mean an empty selection in multi-lap mode and a full
/// revolution in single-lap mode.
pub fn selection_arc(start_angle: f64, end_angle: f64, multi_lap: bool) -> f64 {
    if !multi_lap && same_angle(start_angle, end_angle) {
        360.0
    } else {
        let arc = arc_length(start_angle, end_angle);
        if same_angle(arc, 0.0) {
            0.0
        } else {
            arc
        }
    }
}

/// Selected duration in (fractional) minutes
pub fn duration_minutes(
    start_angle: f64,
    end_angle: f64,
    extra_laps: u32,
    scale: TimeScale,
    multi_lap: bool,
) -> f64 {
    let laps = if multi_lap { extra_laps } else { 0 };
    let degrees = selection_arc(start_angle, end_angle, multi_lap) + 360.0 * laps as f64;
    degrees / 360.0 * scale.total_minutes() as f64
}

/// Selected duration rounded to whole minutes
pub fn whole_minutes(
    start_angle: f64,
    end_angle: f64,
    extra_laps: u32,
    scale: TimeScale,
    multi_lap: bool,
) -> i64 {
    duration_minutes(start_angle, end_angle, extra_laps, scale, multi_lap).round() as i64
}

/// Laps implied by a window of `window_minutes` whose dial arc covers
/// `arc_minutes`
pub fn laps_for_span(window_minutes: i64, arc_minutes: i64, scale: TimeScale) -> u32 {
    let beyond = window_minutes - arc_minutes;
    if beyond <= 0 {
        0
    } else {
        (beyond / scale.total_minutes() as i64) as u32
    }
}
