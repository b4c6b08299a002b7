//! Drawing module - dial face, selection arc and handles
//!
//! Renders a `DialController` using nannou's Draw API. Dial angles are
//! converted from screen orientation (y down) to nannou's y-up space here.

use std::time::Instant;

use dial_core::{
    dial_labels, dial_ticks, format_duration, handle_position, ClockFormatter, DialController,
    DragTarget, SelectionFeedback,
};
use nannou::prelude::*;

/// Color palette for the session dial
pub mod colors {
    use nannou::prelude::*;

    pub const BACKGROUND: Srgb<u8> = Srgb {
        red: 22,
        green: 24,
        blue: 30,
        standard: std::marker::PhantomData,
    };
    pub const TRACK: Srgb<u8> = Srgb {
        red: 48,
        green: 52,
        blue: 62,
        standard: std::marker::PhantomData,
    };
    pub const SELECTION: Srgb<u8> = Srgb {
        red: 88,
        green: 148,
        blue: 255,
        standard: std::marker::PhantomData,
    };
    pub const LAP_RING: Srgb<u8> = Srgb {
        red: 60,
        green: 100,
        blue: 180,
        standard: std::marker::PhantomData,
    };
    pub const KNOB: Srgb<u8> = Srgb {
        red: 240,
        green: 242,
        blue: 246,
        standard: std::marker::PhantomData,
    };
    pub const TEXT_PRIMARY: Srgb<u8> = Srgb {
        red: 236,
        green: 236,
        blue: 240,
        standard: std::marker::PhantomData,
    };
    pub const TEXT_SECONDARY: Srgb<u8> = Srgb {
        red: 150,
        green: 154,
        blue: 166,
        standard: std::marker::PhantomData,
    };
    pub const TICK_MINOR: Srgb<u8> = Srgb {
        red: 80,
        green: 84,
        blue: 96,
        standard: std::marker::PhantomData,
    };
    pub const TICK_MAJOR: Srgb<u8> = Srgb {
        red: 130,
        green: 134,
        blue: 146,
        standard: std::marker::PhantomData,
    };
    pub const ERROR_BG: Srgb<u8> = Srgb {
        red: 120,
        green: 40,
        blue: 40,
        standard: std::marker::PhantomData,
    };
}

/// Dial layout in window coordinates
#[derive(Debug, Clone, Copy)]
pub struct DialGeometry {
    pub center: Point2,
    /// Radius of the track centre line
    pub radius: f32,
    pub track_width: f32,
    pub knob_radius: f32,
}

impl DialGeometry {
    pub fn calculate(window_rect: Rect, bottom_panel_height: f32) -> Self {
        let available_h = window_rect.h() - bottom_panel_height - 60.0;
        let size = window_rect.w().min(available_h).max(120.0);
        let track_width = (size * 0.07).clamp(14.0, 28.0);
        Self {
            center: pt2(window_rect.x(), window_rect.y() + bottom_panel_height / 2.0),
            radius: (size - track_width) / 2.0 - 10.0,
            track_width,
            knob_radius: track_width * 0.7,
        }
    }

    /// Window point for a dial angle at `radius`
    pub fn point_at(&self, angle: f64, radius: f32) -> Point2 {
        let (x, y) = handle_position(angle, radius as f64);
        self.center + vec2(x as f32, -(y as f32))
    }

    /// Pointer sample relative to the centre, y pointing down
    pub fn to_dial_space(&self, pos: Point2) -> (f64, f64) {
        let rel = pos - self.center;
        (rel.x as f64, -(rel.y as f64))
    }
}

/// Short-lived highlight triggered on every committed step
#[derive(Debug, Default)]
pub struct StepPulse {
    pub started: Option<Instant>,
    pub target: Option<DragTarget>,
    pub steps: u64,
}

impl StepPulse {
    /// 1.0 right after a step, fading to 0.0
    pub fn intensity(&self) -> f32 {
        match self.started {
            Some(t) => (1.0 - t.elapsed().as_secs_f32() / 0.25).clamp(0.0, 1.0),
            None => 0.0,
        }
    }
}

impl SelectionFeedback for StepPulse {
    fn selection_changed(&mut self, update: &dial_core::DialUpdate) {
        self.started = Some(Instant::now());
        self.target = Some(update.target);
        self.steps += 1;
    }
}

/// Draw the empty track with ticks and hour labels
pub fn draw_face(draw: &Draw, geometry: &DialGeometry, dial: &DialController<StepPulse>) {
    let config = dial.config();

    draw.ellipse()
        .xy(geometry.center)
        .radius(geometry.radius)
        .no_fill()
        .stroke(colors::TRACK)
        .stroke_weight(geometry.track_width);

    let tick_r = geometry.radius - geometry.track_width / 2.0 - 8.0;
    for tick in dial_ticks(config.scale) {
        if tick.is_major {
            let outer = geometry.point_at(tick.angle, tick_r);
            let inner = geometry.point_at(tick.angle, tick_r - 6.0);
            draw.line()
                .start(inner)
                .end(outer)
                .color(colors::TICK_MAJOR)
                .weight(2.0);
        } else {
            draw.ellipse()
                .xy(geometry.point_at(tick.angle, tick_r))
                .radius(1.0)
                .color(colors::TICK_MINOR);
        }
    }

    let label_r = tick_r - 22.0;
    let font_size = if geometry.radius < 130.0 { 10 } else { 13 };
    for label in dial_labels(config.scale, config.base_offset) {
        draw.text(&label.text)
            .xy(geometry.point_at(label.angle, label_r))
            .color(colors::TEXT_SECONDARY)
            .font_size(font_size)
            .w(60.0);
    }
}

/// Draw the selected arc, lap rings and both handles
pub fn draw_selection(draw: &Draw, geometry: &DialGeometry, dial: &DialController<StepPulse>) {
    // one thin ring per extra lap, just outside the track
    for lap in 0..dial.extra_laps().min(6) {
        draw.ellipse()
            .xy(geometry.center)
            .radius(geometry.radius + geometry.track_width / 2.0 + 4.0 + lap as f32 * 4.0)
            .no_fill()
            .stroke(colors::LAP_RING)
            .stroke_weight(2.0);
    }

    let arc = dial.selection_arc();
    if arc > 0.0 {
        let samples = ((arc / 2.0).ceil() as usize).max(2);
        let start = dial.start_angle();
        let points: Vec<Point2> = (0..=samples)
            .map(|i| geometry.point_at(start + arc * i as f64 / samples as f64, geometry.radius))
            .collect();
        draw.polyline()
            .weight(geometry.track_width - 6.0)
            .color(colors::SELECTION)
            .points(points);
    }

    let glow = dial.feedback().intensity();
    for (angle, label, target) in [
        (dial.start_angle(), "S", DragTarget::Start),
        (dial.end_angle(), "E", DragTarget::End),
    ] {
        let pos = geometry.point_at(angle, geometry.radius);
        let active = matches!(dial.drag_target(), Some(t) if t == target || t == DragTarget::Interval);
        if active && glow > 0.0 {
            draw.ellipse()
                .xy(pos)
                .radius(geometry.knob_radius * (1.0 + 0.4 * glow))
                .color(srgba(88u8, 148u8, 255u8, (120.0 * glow) as u8));
        }
        draw.ellipse()
            .xy(pos)
            .radius(geometry.knob_radius)
            .color(colors::KNOB)
            .stroke(colors::SELECTION)
            .stroke_weight(2.0);
        draw.text(label)
            .xy(pos)
            .color(colors::SELECTION)
            .font_size(14)
            .w(geometry.knob_radius * 2.0);
    }
}

/// Draw start/end times and the duration in the middle of the dial
pub fn draw_center_panel(draw: &Draw, geometry: &DialGeometry, dial: &DialController<StepPulse>) {
    let c = geometry.center;
    let start = dial.start_label(&ClockFormatter);
    let end = dial.end_label(&ClockFormatter);

    draw.text("START")
        .xy(c + vec2(-60.0, 40.0))
        .color(colors::TEXT_SECONDARY)
        .font_size(12)
        .w(100.0);
    draw.text(&start)
        .xy(c + vec2(-60.0, 16.0))
        .color(colors::TEXT_PRIMARY)
        .font_size(26)
        .w(120.0);
    draw.text("END")
        .xy(c + vec2(60.0, 40.0))
        .color(colors::TEXT_SECONDARY)
        .font_size(12)
        .w(100.0);
    draw.text(&end)
        .xy(c + vec2(60.0, 16.0))
        .color(colors::TEXT_PRIMARY)
        .font_size(26)
        .w(120.0);

    draw.text(&format_duration(dial.duration_minutes()))
        .xy(c + vec2(0.0, -30.0))
        .color(colors::SELECTION)
        .font_size(22)
        .w(200.0);
}

/// Draw an error banner at the top of the window
pub fn draw_error_banner(draw: &Draw, message: &str, window_rect: Rect) {
    let banner_height = 34.0;
    let y = window_rect.top() - banner_height / 2.0;
    draw.rect()
        .x_y(0.0, y)
        .w_h(window_rect.w(), banner_height)
        .color(colors::ERROR_BG);
    draw.text(message)
        .x_y(0.0, y)
        .color(colors::TEXT_PRIMARY)
        .font_size(14)
        .w(window_rect.w() - 20.0);
}
