//! Dial scales
//!
//! A scale decides how much wall-clock time one full revolution of the dial
//! represents, and how finely a drag is quantised.

use serde::{Deserialize, Serialize};

/// Time span covered by one revolution of the dial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeScale {
    /// 60 minutes per revolution
    #[default]
    OneHour,
    /// 12 hours per revolution
    HalfDay,
    /// 24 hours per revolution
    FullDay,
}

impl TimeScale {
    pub const ALL: [TimeScale; 3] = [TimeScale::OneHour, TimeScale::HalfDay, TimeScale::FullDay];

    /// Minutes represented by 360°
    pub fn total_minutes(self) -> u32 {
        match self {
            TimeScale::OneHour => 60,
            TimeScale::HalfDay => 720,
            TimeScale::FullDay => 1440,
        }
    }

    /// Angular quantisation step for drags
    pub fn step_degrees(self) -> f64 {
        match self {
            TimeScale::OneHour => 6.0,
            TimeScale::HalfDay => 2.5,
            TimeScale::FullDay => 1.25,
        }
    }

    /// Minutes covered by a single drag step
    pub fn step_minutes(self) -> u32 {
        let steps_per_turn = (360.0 / self.step_degrees()).round() as u32;
        self.total_minutes() / steps_per_turn
    }

    /// Degrees per minute on this scale
    pub fn degrees_per_minute(self) -> f64 {
        360.0 / self.total_minutes() as f64
    }

    /// Tick marks drawn on the face: (total ticks, every n-th is major)
    pub fn tick_layout(self) -> (usize, usize) {
        match self {
            TimeScale::OneHour => (60, 5),
            TimeScale::HalfDay => (48, 4),
            TimeScale::FullDay => (48, 2),
        }
    }

    /// Short human label
    pub fn label(self) -> &'static str {
        match self {
            TimeScale::OneHour => "1 hour",
            TimeScale::HalfDay => "12 hours",
            TimeScale::FullDay => "24 hours",
        }
    }
}

impl std::fmt::Display for TimeScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A tick on the dial face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Clockwise degrees from 12 o'clock
    pub angle: f64,
    pub is_major: bool,
}

/// A numeric hour label on the dial face
#[derive(Debug, Clone, PartialEq)]
pub struct DialLabel {
    /// Clockwise degrees from 12 o'clock
    pub angle: f64,
    pub text: String,
}

/// All ticks for a scale, starting at 12 o'clock
pub fn dial_ticks(scale: TimeScale) -> Vec<Tick> {
    let (total, major_every) = scale.tick_layout();
    (0..total)
        .map(|i| Tick {
            angle: i as f64 / total as f64 * 360.0,
            is_major: i % major_every == 0,
        })
        .collect()
}

/// Hour labels for a scale rotated by `base_offset` minutes
///
/// The full-day face is never rotated: midnight always sits at the top.
pub fn dial_labels(scale: TimeScale, base_offset: u32) -> Vec<DialLabel> {
    let base_hour = (base_offset / 60) % 24;
    match scale {
        TimeScale::OneHour => [0u32, 15, 30, 45]
            .iter()
            .map(|&m| DialLabel {
                angle: m as f64 / 60.0 * 360.0,
                text: format!("{}:{:02}", base_hour, m),
            })
            .collect(),
        TimeScale::HalfDay => (0..6u32)
            .map(|i| DialLabel {
                angle: i as f64 / 6.0 * 360.0,
                text: format!("{}", (base_hour + i * 2) % 24),
            })
            .collect(),
        TimeScale::FullDay => (0..8u32)
            .map(|i| DialLabel {
                angle: (i * 3) as f64 / 24.0 * 360.0,
                text: format!("{}", i * 3),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_minutes() {
        assert_eq!(TimeScale::OneHour.step_minutes(), 1);
        assert_eq!(TimeScale::HalfDay.step_minutes(), 5);
        assert_eq!(TimeScale::FullDay.step_minutes(), 5);
    }

    #[test]
    fn test_ticks_start_at_top() {
        let ticks = dial_ticks(TimeScale::OneHour);
        assert_eq!(ticks.len(), 60);
        assert_eq!(ticks[0].angle, 0.0);
        assert!(ticks[0].is_major);
        assert!(!ticks[1].is_major);
        assert_eq!(ticks.iter().filter(|t| t.is_major).count(), 12);
    }

    #[test]
    fn test_one_hour_labels_follow_offset() {
        let labels = dial_labels(TimeScale::OneHour, 600);
        let texts: Vec<_> = labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["10:00", "10:15", "10:30", "10:45"]);
        assert_eq!(labels[2].angle, 180.0);
    }

    #[test]
    fn test_half_day_labels_wrap_midnight() {
        let labels = dial_labels(TimeScale::HalfDay, 20 * 60);
        let texts: Vec<_> = labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["20", "22", "0", "2", "4", "6"]);
    }

    #[test]
    fn test_full_day_labels_ignore_offset() {
        let labels = dial_labels(TimeScale::FullDay, 300);
        assert_eq!(labels.len(), 8);
        assert_eq!(labels[0].text, "0");
        assert_eq!(labels[4].angle, 180.0);
    }

    #[test]
    fn test_serde_names() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            scale: TimeScale,
        }
        let text = toml::to_string(&Wrapper { scale: TimeScale::HalfDay }).unwrap();
        assert!(text.contains("half_day"));
    }
}
