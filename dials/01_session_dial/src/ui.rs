//! UI module - egui settings window and session bar
//!
//! Widgets only edit copies of the configuration; the caller applies the
//! result to the dial after the egui frame ends.

use chrono::{Duration, NaiveDate};
use dial_core::{format_duration, format_range, DialConfig, RelativeDayFormatter, TimeFormatter, TimeScale, TimeWindow};
use nannou_egui::egui;

/// Result of UI interactions
#[derive(Debug, Default)]
pub struct UiResult {
    /// If Some, the user edited the dial configuration
    pub config: Option<DialConfig>,
    /// If Some, move the window so that it ends on this date
    pub anchor_date: Option<NaiveDate>,
    /// Reset to the default window for the current scale
    pub reset_window: bool,
    /// Save button pressed
    pub save: bool,
}

/// Draw the settings window
pub fn draw_settings_panel(ctx: &egui::Context, config: &DialConfig, result: &mut UiResult) {
    let mut edited = *config;

    egui::Window::new("Dial")
        .collapsible(true)
        .resizable(false)
        .default_width(220.0)
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
        .show(ctx, |ui| {
            ui.label("Scale");
            ui.horizontal(|ui| {
                for scale in TimeScale::ALL {
                    ui.selectable_value(&mut edited.scale, scale, scale.label());
                }
            });
            ui.separator();

            let mut hour = edited.base_offset / 60;
            ui.add(egui::Slider::new(&mut hour, 0..=23).text("Top of dial (hour)"));
            edited.base_offset = hour * 60;

            ui.checkbox(&mut edited.allow_multi_lap, "Allow multiple laps");
            ui.add(
                egui::Slider::new(&mut edited.hit_threshold_degrees, 8.0..=45.0)
                    .text("Handle grab (°)"),
            );
            ui.separator();
            ui.label("1/2/3 scale · M laps · ←/→ rotate · R reset · Del defaults");
        });

    if edited != *config {
        result.config = Some(edited);
    }
}

/// Draw the bottom bar with the range summary, wake date and save button
pub fn draw_session_bar(
    ctx: &egui::Context,
    window: &TimeWindow,
    duration_minutes: i64,
    today: NaiveDate,
    result: &mut UiResult,
) {
    let day_label = RelativeDayFormatter::new(today);
    let wake_date = window.end.date_naive();

    egui::TopBottomPanel::bottom("session_bar")
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "{} · {}",
                    format_range(window),
                    format_duration(duration_minutes)
                ));
                ui.separator();

                if ui.button("◀").on_hover_text("Previous day").clicked() {
                    result.anchor_date = Some(wake_date - Duration::days(1));
                }
                ui.label(format!("Ends {}", day_label.format(&window.end)));
                if ui.button("▶").on_hover_text("Next day").clicked() {
                    result.anchor_date = Some(wake_date + Duration::days(1));
                }
                ui.separator();

                if ui.button("Reset").clicked() {
                    result.reset_window = true;
                }
                if ui.button("Save").clicked() {
                    result.save = true;
                }
            });
        });
}
