//! Property tests for the dial controller and its mapping

use chrono::{DateTime, Duration, TimeZone};
use chrono_tz::{Tz, UTC};
use dial_core::mapping::{angle_to_minute_of_day, time_to_angle};
use dial_core::{handle_position, DialConfig, DialController, DragTarget, TimeScale, TimeWindow};
use proptest::prelude::*;

const RADIUS: f64 = 150.0;

fn scale_strategy() -> impl Strategy<Value = TimeScale> {
    prop_oneof![
        Just(TimeScale::OneHour),
        Just(TimeScale::HalfDay),
        Just(TimeScale::FullDay),
    ]
}

fn time_at(minute_of_day: u32) -> DateTime<Tz> {
    UTC.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap() + Duration::minutes(minute_of_day as i64)
}

fn is_on_step(angle: f64, step: f64) -> bool {
    ((angle / step).round() * step - angle).abs() < 1e-6
}

fn move_to<F: dial_core::SelectionFeedback>(dial: &mut DialController<F>, angle: f64) {
    let (x, y) = handle_position(angle, RADIUS);
    dial.pointer_moved(x, y);
}

proptest! {
    #[test]
    fn round_trip_is_exact_modulo_the_fold(
        minute in 0u32..1440,
        offset in 0u32..1440,
        scale in scale_strategy(),
    ) {
        let angle = time_to_angle(&time_at(minute), scale, offset);
        let back = angle_to_minute_of_day(angle, scale, offset, 0, false);
        let total = scale.total_minutes() as i64;
        prop_assert_eq!((back as i64 - minute as i64).rem_euclid(total), 0);
        if scale == TimeScale::FullDay {
            prop_assert_eq!(back, minute);
        }
    }

    #[test]
    fn dragged_handle_lands_on_step(
        start in 0u32..1440,
        length in 1u32..600,
        scale in scale_strategy(),
        multi in any::<bool>(),
        path in prop::collection::vec(0.0f64..360.0, 1..40),
    ) {
        let window = TimeWindow::new(time_at(start), time_at(start) + Duration::minutes(length as i64));
        let config = DialConfig { scale, allow_multi_lap: multi, ..DialConfig::default() };
        let mut dial = DialController::new(config, window);
        dial.pointer_down();
        for angle in path {
            let (x, y) = handle_position(angle, RADIUS);
            if let Some(update) = dial.pointer_moved(x, y) {
                let step = scale.step_degrees();
                match update.target {
                    DragTarget::Start | DragTarget::Interval => {
                        prop_assert!(is_on_step(update.start_angle, step))
                    }
                    DragTarget::End => prop_assert!(is_on_step(update.end_angle, step)),
                }
            }
        }
    }

    #[test]
    fn window_always_matches_dial_duration(
        start in 0u32..1440,
        length in 0u32..3000,
        scale in scale_strategy(),
        multi in any::<bool>(),
        press in 0.0f64..360.0,
        path in prop::collection::vec(0.0f64..360.0, 1..40),
    ) {
        // single-lap dials can only show up to one full period
        let total = scale.total_minutes();
        let length = if multi { length } else { 1 + length % total };
        let window = TimeWindow::new(time_at(start), time_at(start) + Duration::minutes(length as i64));
        let config = DialConfig { scale, allow_multi_lap: multi, ..DialConfig::default() };
        let mut dial = DialController::new(config, window);
        prop_assert_eq!(dial.window().duration_minutes(), dial.duration_minutes());
        dial.pointer_down();
        move_to(&mut dial, press);
        for angle in path {
            move_to(&mut dial, angle);
            prop_assert_eq!(dial.window().duration_minutes(), dial.duration_minutes());
            prop_assert!(dial.duration_minutes() >= 0);
            prop_assert!(dial.start_angle() >= 0.0 && dial.start_angle() < 360.0);
            prop_assert!(dial.end_angle() >= 0.0 && dial.end_angle() < 360.0);
        }
        dial.pointer_up();
        prop_assert!(dial.duration_minutes() >= 0);
    }

    #[test]
    fn interval_translation_keeps_laps_and_duration(
        start in 0u32..1440,
        laps in 0u32..4,
        scale in scale_strategy(),
        path in prop::collection::vec(0.0f64..360.0, 1..40),
    ) {
        // a selection covering half the dial plus some whole laps
        let total = scale.total_minutes() as i64;
        let length = total / 2 + laps as i64 * total;
        let window = TimeWindow::new(time_at(start), time_at(start) + Duration::minutes(length));
        let config = DialConfig { scale, allow_multi_lap: true, ..DialConfig::default() };
        let mut dial = DialController::new(config, window);
        prop_assert_eq!(dial.extra_laps(), laps);
        let before = dial.duration_minutes();

        // grab the middle of the selection
        let middle = dial.start_angle() + 90.0;
        dial.pointer_down();
        move_to(&mut dial, middle);
        prop_assert_eq!(dial.drag_target(), Some(DragTarget::Interval));
        for angle in path {
            move_to(&mut dial, angle);
            prop_assert_eq!(dial.extra_laps(), laps);
            prop_assert_eq!(dial.duration_minutes(), before);
            prop_assert_eq!(dial.window().duration_minutes(), before);
        }
    }

    #[test]
    fn external_window_agrees_with_dial(
        start in 0u32..1440,
        first in 0u32..3000,
        second in 0u32..3000,
        scale in scale_strategy(),
    ) {
        let window = |length: u32| {
            TimeWindow::new(time_at(start), time_at(start) + Duration::minutes(length as i64))
        };
        let config = DialConfig { scale, allow_multi_lap: true, ..DialConfig::default() };
        let mut dial = DialController::new(config, window(first));
        prop_assert_eq!(dial.window().duration_minutes(), dial.duration_minutes());

        prop_assert!(dial.set_window(window(second)));
        prop_assert_eq!(dial.duration_minutes(), second as i64);
    }

    #[test]
    fn single_lap_coinciding_handles_are_never_empty(
        minute in 0u32..1440,
        scale in scale_strategy(),
    ) {
        let window = TimeWindow::new(time_at(minute), time_at(minute));
        let single = DialController::new(DialConfig { scale, ..DialConfig::default() }, window);
        prop_assert_eq!(single.duration_minutes(), scale.total_minutes() as i64);

        let multi = DialController::new(
            DialConfig { scale, allow_multi_lap: true, ..DialConfig::default() },
            window,
        );
        prop_assert_eq!(multi.duration_minutes(), 0);
    }
}
