//! Session Dial
//!
//! A circular start/end picker for timed sessions: drag either handle around
//! the dial, or grab the coloured arc to move the whole session. The selected
//! range, its duration and the wake date are shown below the dial.

mod drawing;
mod ui;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use dial_core::mapping::{minute_of_day, with_minute_of_day};
use dial_core::{format_range, ClockFormatter, DialConfig, DialController, TimeScale, TimeWindow};
use nannou::prelude::*;
use nannou_egui::{self, Egui};
use serde::{Deserialize, Serialize};

use crate::drawing::{colors, DialGeometry, StepPulse};
use crate::ui::UiResult;

const APP_NAME: &str = "session_dial";
const DEFAULT_TZ: &str = "UTC";
const SESSION_BAR_HEIGHT: f32 = 48.0;
const DEFAULT_SESSION_MINUTES: i64 = 30;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    nannou::app(model).update(update).run();
}

/// Persisted configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct Config {
    zone_id: String,
    dial: DialConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zone_id: DEFAULT_TZ.to_string(),
            dial: DialConfig::default(),
        }
    }
}

/// Application state
struct Model {
    zone: Tz,
    dial: DialController<StepPulse>,
    /// Error message to display (if any)
    error_message: Option<String>,
    /// egui integration
    egui: Egui,
}

impl Model {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.zone)
    }

    fn apply_config(&mut self, config: DialConfig) {
        if let Err(e) = config.validate() {
            log::warn!("rejected dial settings: {}", e);
            self.error_message = Some(e.to_string());
            return;
        }
        let scale_changed = config.scale != self.dial.scale();
        self.dial.set_config(config);
        if scale_changed {
            self.dial.set_window(default_window(&self.now(), config.scale));
        }
        self.error_message = None;
        save_config(self);
    }

    fn anchor_to(&mut self, date: NaiveDate) {
        match self.dial.window().anchored_to(date) {
            Some(window) => {
                self.dial.set_window(window);
            }
            None => {
                let end = self.dial.end_label(&ClockFormatter);
                log::warn!("{} does not exist on {}, keeping window", end, date);
                self.error_message = Some(format!("That time does not exist on {}", date));
            }
        }
    }
}

/// Initial selection for a scale
///
/// The full-day dial starts with last night's sleep; shorter dials start a
/// half-hour session at the current minute.
fn default_window(now: &DateTime<Tz>, scale: TimeScale) -> TimeWindow {
    if scale == TimeScale::FullDay {
        return TimeWindow::sleep_default(now);
    }
    let start = with_minute_of_day(now, minute_of_day(now)).unwrap_or(*now);
    TimeWindow::new(start, start + Duration::minutes(DEFAULT_SESSION_MINUTES))
}

fn save_config(model: &Model) {
    let config = Config {
        zone_id: model.zone.name().to_string(),
        dial: *model.dial.config(),
    };
    if let Err(e) = dial_core::save_config(APP_NAME, &config) {
        log::error!("Failed to save config: {}", e);
    }
}

/// Remove the saved settings and return to the defaults without saving again
fn forget_settings(model: &mut Model) {
    if let Err(e) = dial_core::delete_config(APP_NAME) {
        log::error!("Failed to delete config: {}", e);
        model.error_message = Some(e.to_string());
        return;
    }
    let config = DialConfig::default();
    model.dial.set_config(config);
    model.dial.set_window(default_window(&model.now(), config.scale));
    model.error_message = None;
    log::info!("settings reset to defaults");
}

fn model(app: &App) -> Model {
    // Disable default escape-to-exit behavior
    app.set_exit_on_escape(false);

    let window_id = app
        .new_window()
        .title("Session Dial")
        .size(720, 800)
        .min_size(420, 480)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_moved(mouse_moved)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let config: Config = match dial_core::load_config(APP_NAME) {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            log::warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    };

    let zone: Tz = config.zone_id.parse().unwrap_or_else(|_| {
        log::warn!("unknown time zone {:?}, falling back to UTC", config.zone_id);
        chrono_tz::UTC
    });

    let now = Utc::now().with_timezone(&zone);
    let dial_config = config.dial.sanitized();
    let dial = DialController::with_feedback(
        dial_config,
        default_window(&now, dial_config.scale),
        StepPulse::default(),
    );

    Model {
        zone,
        dial,
        error_message: None,
        egui,
    }
}

fn update(_app: &App, model: &mut Model, update: Update) {
    let today = model.now().date_naive();
    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();

    let mut result = UiResult::default();
    let config = *model.dial.config();
    let window = *model.dial.window();
    ui::draw_settings_panel(&ctx, &config, &mut result);
    ui::draw_session_bar(&ctx, &window, model.dial.duration_minutes(), today, &mut result);

    drop(ctx);

    if let Some(config) = result.config {
        model.apply_config(config);
    }
    if let Some(date) = result.anchor_date {
        model.anchor_to(date);
    }
    if result.reset_window {
        let window = default_window(&model.now(), model.dial.scale());
        model.dial.set_window(window);
    }
    if result.save {
        let window = model.dial.window();
        log::info!(
            "session saved: {} ({} min)",
            format_range(window),
            window.duration_minutes()
        );
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();
    let geometry = DialGeometry::calculate(window_rect, SESSION_BAR_HEIGHT);

    draw.background().color(colors::BACKGROUND);

    drawing::draw_face(&draw, &geometry, &model.dial);
    drawing::draw_selection(&draw, &geometry, &model.dial);
    drawing::draw_center_panel(&draw, &geometry, &model.dial);

    if let Some(ref message) = model.error_message {
        drawing::draw_error_banner(&draw, message, window_rect);
    }

    draw.to_frame(app, &frame).unwrap();
    model.egui.draw_to_frame(&frame).unwrap();
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    let mut config = *model.dial.config();
    match key {
        Key::Key1 => config.scale = TimeScale::OneHour,
        Key::Key2 => config.scale = TimeScale::HalfDay,
        Key::Key3 => config.scale = TimeScale::FullDay,
        Key::M => config.allow_multi_lap = !config.allow_multi_lap,
        Key::Left => config.base_offset = (config.base_offset + 1440 - 60) % 1440,
        Key::Right => config.base_offset = (config.base_offset + 60) % 1440,
        Key::R => {
            let window = default_window(&model.now(), config.scale);
            model.dial.set_window(window);
            return;
        }
        Key::Escape => {
            model.dial.pointer_cancelled();
            return;
        }
        Key::Delete => {
            forget_settings(model);
            return;
        }
        _ => return,
    }
    model.apply_config(config);
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left || model.egui.ctx().wants_pointer_input() {
        return;
    }
    model.dial.pointer_down();
    // a press is also the first sample, so a click on a handle starts the drag
    let geometry = DialGeometry::calculate(app.window_rect(), SESSION_BAR_HEIGHT);
    let (x, y) = geometry.to_dial_space(app.mouse.position());
    model.dial.pointer_moved(x, y);
}

fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.dial.pointer_up();
    }
}

fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    let geometry = DialGeometry::calculate(app.window_rect(), SESSION_BAR_HEIGHT);
    let (x, y) = geometry.to_dial_space(pos);
    model.dial.pointer_moved(x, y);
}

fn raw_window_event(app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);

    // Touch input maps onto the same pointer lifecycle as the mouse
    if let nannou::winit::event::WindowEvent::Touch(touch) = event {
        let window_rect = app.window_rect();
        let geometry = DialGeometry::calculate(window_rect, SESSION_BAR_HEIGHT);
        let pos = pt2(
            touch.location.x as f32 - window_rect.w() / 2.0,
            window_rect.h() / 2.0 - touch.location.y as f32,
        );
        let (x, y) = geometry.to_dial_space(pos);

        match touch.phase {
            nannou::winit::event::TouchPhase::Started => {
                model.dial.pointer_down();
                model.dial.pointer_moved(x, y);
            }
            nannou::winit::event::TouchPhase::Moved => {
                model.dial.pointer_moved(x, y);
            }
            nannou::winit::event::TouchPhase::Ended => model.dial.pointer_up(),
            nannou::winit::event::TouchPhase::Cancelled => model.dial.pointer_cancelled(),
        }
    }
}
