//! Dial controller - drag interpretation and time synchronisation
//!
//! The controller owns the two handle angles and the lap counter. While idle
//! the bound `TimeWindow` is authoritative and angles are derived from it.
//! While a drag is in progress the angles are authoritative and every
//! committed step writes the window immediately.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;

use crate::angle::{
    angular_diff, arc_length, in_arc, normalize, pointer_angle, same_angle, snap,
};
use crate::config::DialConfig;
use crate::format::TimeFormatter;
use crate::laps::{laps_for_span, selection_arc, whole_minutes, LapCounter};
use crate::mapping::{angle_delta_to_duration, end_time_for, shift_wall_clock, time_to_angle};
use crate::scale::TimeScale;
use crate::window::TimeWindow;

/// What a drag is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Start,
    End,
    /// The whole selection, both handles rigidly
    Interval,
}

/// Snapshot taken when a drag is classified
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub target: DragTarget,
    /// Pointer angle at classification
    pub reference_angle: f64,
    pub initial_start_angle: f64,
    pub initial_end_angle: f64,
    /// End angle as of the last committed step
    pub previous_end_angle: f64,
}

/// Interaction phase of the controller
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Pointer is down, target not classified yet
    Pressed,
    Dragging(DragSession),
    /// Pointer went down away from any target; wait for release
    Ignoring,
}

/// Result of one committed drag step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialUpdate {
    pub target: DragTarget,
    pub window: TimeWindow,
    pub start_angle: f64,
    pub end_angle: f64,
    pub extra_laps: u32,
}

/// Notified once per committed step (haptics, sounds, redraw requests)
pub trait SelectionFeedback {
    fn selection_changed(&mut self, update: &DialUpdate);
}

/// Feedback port that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeedback;

impl SelectionFeedback for NoFeedback {
    fn selection_changed(&mut self, _update: &DialUpdate) {}
}

impl<F> SelectionFeedback for F
where
    F: FnMut(&DialUpdate),
{
    fn selection_changed(&mut self, update: &DialUpdate) {
        self(update)
    }
}

/// Circular time-range controller bound to one `TimeWindow`
pub struct DialController<F = NoFeedback> {
    config: DialConfig,
    window: TimeWindow,
    start_angle: f64,
    end_angle: f64,
    laps: LapCounter,
    phase: Phase,
    feedback: F,
}

impl DialController<NoFeedback> {
    pub fn new(config: DialConfig, window: TimeWindow) -> Self {
        Self::with_feedback(config, window, NoFeedback)
    }
}

impl<F: SelectionFeedback> DialController<F> {
    /// Bind a dial to `window`
    ///
    /// In multi-lap mode the initial lap count is taken from the window's
    /// actual length.
    pub fn with_feedback(config: DialConfig, window: TimeWindow, feedback: F) -> Self {
        let mut controller = Self {
            config: config.sanitized(),
            window,
            start_angle: 0.0,
            end_angle: 0.0,
            laps: LapCounter::default(),
            phase: Phase::Idle,
            feedback,
        };
        controller.pull_angles();
        controller.derive_laps();
        controller
    }

    pub fn config(&self) -> &DialConfig {
        &self.config
    }

    pub fn scale(&self) -> TimeScale {
        self.config.scale
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    pub fn extra_laps(&self) -> u32 {
        self.laps.laps()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn drag_target(&self) -> Option<DragTarget> {
        match self.phase {
            Phase::Dragging(session) => Some(session.target),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    /// Degrees of arc to draw between the handles
    pub fn selection_arc(&self) -> f64 {
        selection_arc(self.start_angle, self.end_angle, self.config.allow_multi_lap)
    }

    /// Selected duration in whole minutes, as shown on the dial
    pub fn duration_minutes(&self) -> i64 {
        whole_minutes(
            self.start_angle,
            self.end_angle,
            self.laps.laps(),
            self.config.scale,
            self.config.allow_multi_lap,
        )
    }

    pub fn start_label(&self, formatter: &impl TimeFormatter) -> String {
        formatter.format(&self.window.start)
    }

    pub fn end_label(&self, formatter: &impl TimeFormatter) -> String {
        formatter.format(&self.window.end)
    }

    // ── external → dial ──

    /// Replace the bound window from outside
    ///
    /// Ignored while a drag is in progress; returns whether it was applied.
    /// The lap count is kept as long as the new window still spans it.
    pub fn set_window(&mut self, window: TimeWindow) -> bool {
        if self.is_dragging() {
            log::debug!("ignoring external window update during drag");
            return false;
        }
        self.window = window;
        self.pull_angles();
        if self.config.allow_multi_lap && self.window.wall_minutes() != self.duration_minutes() {
            self.derive_laps();
        }
        true
    }

    /// Switch scale; laps are counted again for the new period
    pub fn set_scale(&mut self, scale: TimeScale) {
        if scale == self.config.scale {
            return;
        }
        self.config.scale = scale;
        self.end_drag_session();
        self.pull_angles();
        self.derive_laps();
    }

    pub fn set_base_offset(&mut self, base_offset: u32) {
        self.config.base_offset = base_offset % crate::mapping::MINUTES_PER_DAY;
        self.end_drag_session();
        self.pull_angles();
    }

    pub fn set_multi_lap(&mut self, allow_multi_lap: bool) {
        if allow_multi_lap == self.config.allow_multi_lap {
            return;
        }
        self.config.allow_multi_lap = allow_multi_lap;
        self.laps.reset();
        self.end_drag_session();
        self.pull_angles();
        self.derive_laps();
    }

    pub fn set_hit_threshold(&mut self, degrees: f64) {
        self.config.hit_threshold_degrees = degrees;
        self.config = self.config.sanitized();
    }

    /// Apply a whole configuration at once
    pub fn set_config(&mut self, config: DialConfig) {
        let config = config.sanitized();
        self.set_hit_threshold(config.hit_threshold_degrees);
        // laps derived by the multi-lap switch must see the new period
        self.set_scale(config.scale);
        self.set_multi_lap(config.allow_multi_lap);
        if config.base_offset != self.config.base_offset {
            self.set_base_offset(config.base_offset);
        }
    }

    // ── pointer lifecycle ──

    pub fn pointer_down(&mut self) {
        if self.phase == Phase::Idle {
            self.phase = Phase::Pressed;
        }
    }

    /// Feed one pointer sample relative to the dial centre (y grows downward)
    ///
    /// Returns the committed change, if the sample moved a handle by at least
    /// one step.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> Option<DialUpdate> {
        let angle = pointer_angle(x, y);
        let session = match self.phase {
            Phase::Idle | Phase::Ignoring => return None,
            Phase::Pressed => match self.classify(angle) {
                Some(session) => session,
                None => {
                    log::debug!("press at {:.1}° hit nothing", angle);
                    self.phase = Phase::Ignoring;
                    return None;
                }
            },
            Phase::Dragging(session) => session,
        };
        self.phase = Phase::Dragging(session);

        let target = session.target;
        let committed = match target {
            DragTarget::Start => self.drag_start(angle),
            DragTarget::End => self.drag_end(angle),
            DragTarget::Interval => self.drag_interval(angle, &session),
        };
        if !committed {
            return None;
        }

        if let Phase::Dragging(ref mut active) = self.phase {
            active.previous_end_angle = self.end_angle;
        }

        let update = DialUpdate {
            target,
            window: self.window,
            start_angle: self.start_angle,
            end_angle: self.end_angle,
            extra_laps: self.laps.laps(),
        };
        log::trace!(
            "{:?} -> start {:.2}° end {:.2}° laps {}",
            target,
            update.start_angle,
            update.end_angle,
            update.extra_laps
        );
        self.feedback.selection_changed(&update);
        Some(update)
    }

    /// Release: back to idle, re-derive angles from the window
    pub fn pointer_up(&mut self) {
        let was_dragging = self.is_dragging();
        self.phase = Phase::Idle;
        if was_dragging {
            self.pull_angles();
        }
    }

    pub fn pointer_cancelled(&mut self) {
        self.pointer_up();
    }

    // ── internals ──

    /// Start wins over End, End wins over Interval
    fn classify(&self, angle: f64) -> Option<DragSession> {
        let threshold = self.config.hit_threshold_degrees;
        let target = if angular_diff(angle, self.start_angle).abs() < threshold {
            DragTarget::Start
        } else if angular_diff(angle, self.end_angle).abs() < threshold {
            DragTarget::End
        } else if in_arc(angle, self.start_angle, self.end_angle) {
            DragTarget::Interval
        } else {
            return None;
        };
        log::debug!("drag classified as {:?} at {:.1}°", target, angle);
        Some(DragSession {
            target,
            reference_angle: angle,
            initial_start_angle: self.start_angle,
            initial_end_angle: self.end_angle,
            previous_end_angle: self.end_angle,
        })
    }

    fn step(&self) -> f64 {
        self.config.scale.step_degrees()
    }

    fn drag_start(&mut self, angle: f64) -> bool {
        let target = snap(angle, self.step());
        if same_angle(target, self.start_angle) {
            return false;
        }
        if self.config.allow_multi_lap {
            let old_arc = arc_length(self.start_angle, self.end_angle);
            let new_arc = arc_length(target, self.end_angle);
            self.laps.observe(old_arc, new_arc);
        }
        let delta = angular_diff(target, self.start_angle);
        let Some(start) = self.shifted(&self.window.start, delta) else {
            return false;
        };
        self.start_angle = target;
        self.window.start = start;
        self.push_end();
        true
    }

    fn drag_end(&mut self, angle: f64) -> bool {
        let target = snap(angle, self.step());
        if same_angle(target, self.end_angle) {
            return false;
        }
        if self.config.allow_multi_lap {
            let previous = match self.phase {
                Phase::Dragging(session) => session.previous_end_angle,
                _ => self.end_angle,
            };
            let old_arc = arc_length(self.start_angle, previous);
            let new_arc = arc_length(self.start_angle, target);
            self.laps.observe(old_arc, new_arc);
        }
        self.end_angle = target;
        self.push_end();
        true
    }

    fn drag_interval(&mut self, angle: f64, session: &DragSession) -> bool {
        let step = self.step();
        let target = snap(
            session.initial_start_angle + angular_diff(angle, session.reference_angle),
            step,
        );
        if same_angle(target, self.start_angle) {
            return false;
        }
        let delta = angular_diff(target, self.start_angle);
        let (Some(start), Some(end)) = (
            self.shifted(&self.window.start, delta),
            self.shifted(&self.window.end, delta),
        ) else {
            return false;
        };
        self.start_angle = target;
        // keep the end on the minute grid so repeated shifts don't drift
        self.end_angle = snap(
            normalize(self.end_angle + delta),
            self.config.scale.degrees_per_minute(),
        );
        self.window = TimeWindow::new(start, end);
        true
    }

    fn shifted(&self, time: &DateTime<Tz>, delta_degrees: f64) -> Option<DateTime<Tz>> {
        let delta: Duration = angle_delta_to_duration(delta_degrees, self.config.scale);
        let shifted = shift_wall_clock(time, delta);
        if shifted.is_none() {
            log::warn!("time shift of {:.2}° out of range, keeping {}", delta_degrees, time);
        }
        shifted
    }

    /// Write the end time implied by the current angles
    fn push_end(&mut self) {
        match end_time_for(
            &self.window.start,
            self.start_angle,
            self.end_angle,
            self.laps.laps(),
            self.config.scale,
            self.config.allow_multi_lap,
        ) {
            Some(end) => self.window.end = end,
            None => log::warn!("could not map end angle {:.2}°, keeping {}", self.end_angle, self.window.end),
        }
    }

    fn pull_angles(&mut self) {
        let scale = self.config.scale;
        let offset = self.config.base_offset;
        let grid = scale.degrees_per_minute();
        self.start_angle = snap(time_to_angle(&self.window.start, scale, offset), grid);
        self.end_angle = snap(time_to_angle(&self.window.end, scale, offset), grid);
    }

    fn derive_laps(&mut self) {
        if !self.config.allow_multi_lap {
            self.laps.reset();
            return;
        }
        let arc_minutes = whole_minutes(self.start_angle, self.end_angle, 0, self.config.scale, true);
        let laps = laps_for_span(self.window.wall_minutes(), arc_minutes, self.config.scale);
        self.laps = LapCounter::new(laps);
    }

    fn end_drag_session(&mut self) {
        if self.phase != Phase::Idle {
            log::debug!("configuration changed, ending drag session");
            self.phase = Phase::Idle;
        }
    }
}
