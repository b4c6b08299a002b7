//! Circular time-range dial
//!
//! Pure dial logic shared by the front ends: angle ↔ time mapping, drag
//! interpretation with snap-to-step, lap tracking for selections longer than
//! one revolution, and configuration persistence.

pub mod angle;
pub mod config;
pub mod controller;
pub mod format;
pub mod laps;
pub mod mapping;
pub mod scale;
pub mod window;

pub use angle::{handle_position, pointer_angle};
pub use config::{
    config_dir, config_path, delete_config, load_config, save_config, ConfigError, DialConfig,
};
pub use controller::{
    DialController, DialUpdate, DragSession, DragTarget, NoFeedback, Phase, SelectionFeedback,
};
pub use format::{format_duration, format_range, ClockFormatter, RelativeDayFormatter, TimeFormatter};
pub use laps::{LapChange, LapCounter};
pub use mapping::{angle_to_minute_of_day, time_to_angle};
pub use scale::{dial_labels, dial_ticks, DialLabel, Tick, TimeScale};
pub use window::TimeWindow;
