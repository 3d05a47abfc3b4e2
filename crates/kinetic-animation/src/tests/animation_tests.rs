use super::*;

use kinetic_graphics::Point;
use web_time::{Duration, Instant};

#[test]
fn easing_endpoints_are_exact() {
    for easing in [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::FastOutSlowIn,
        Easing::CubicOut,
    ] {
        assert_eq!(easing.transform(0.0), 0.0, "{easing:?}");
        assert_eq!(easing.transform(1.0), 1.0, "{easing:?}");
    }
}

#[test]
fn ease_out_is_ahead_of_linear_at_midpoint() {
    assert!(Easing::EaseOut.transform(0.5) > 0.5);
    assert!(Easing::CubicOut.transform(0.5) > 0.8);
    assert!(Easing::EaseIn.transform(0.5) < 0.5);
}

#[test]
fn easing_is_monotonic() {
    let mut previous = 0.0;
    for step in 0..=100 {
        let value = Easing::FastOutSlowIn.transform(step as f32 / 100.0);
        assert!(value + 1e-5 >= previous);
        previous = value;
    }
}

#[test]
fn approach_moves_fixed_fraction() {
    let next = approach(&0.0f32, &100.0, 0.1);
    assert!((next - 10.0).abs() < 1e-6);

    let point = approach(&Point::ZERO, &Point::new(10.0, -20.0), 0.5);
    assert_eq!(point, Point::new(5.0, -10.0));
}

#[test]
fn approach_or_snap_lands_on_target_within_epsilon() {
    let near = approach_or_snap(99.99, 100.0, 0.1, 0.05);
    assert!(near.settled);
    assert_eq!(near.value, 100.0);

    let far = approach_or_snap(0.0, 100.0, 0.1, 0.05);
    assert!(!far.settled);
    assert!((far.value - 10.0).abs() < 1e-6);
}

#[test]
fn approach_degrees_takes_short_way_round() {
    let next = approach_degrees(350.0, 10.0, 0.5);
    assert!((next - 0.0).abs() < 1e-4 || (next - 360.0).abs() < 1e-4);

    let back = approach_degrees(10.0, 350.0, 0.5);
    assert!(back.abs() < 1e-4 || (back - 360.0).abs() < 1e-4);

    let wrapped = approach_degrees(340.0, 20.0, 0.25);
    assert!((wrapped - 350.0).abs() < 1e-3);
}

#[test]
fn transition_samples_between_endpoints() {
    let start = Instant::now();
    let transition = Transition::new(0.5f32, 1.0, AnimationSpec::linear(300), start);

    assert_eq!(transition.value_at(start), 0.5);
    let mid = transition.value_at(start + Duration::from_millis(150));
    assert!((mid - 0.75).abs() < 1e-3);
    assert!(transition.is_finished(start + Duration::from_millis(300)));
    assert_eq!(transition.value_at(start + Duration::from_secs(5)), 1.0);
}

#[test]
fn delayed_spec_holds_start_value() {
    let spec = AnimationSpec::linear(100).with_delay(50);
    assert_eq!(spec.fraction_at(Duration::from_millis(25)), 0.0);
    assert!((spec.fraction_at(Duration::from_millis(100)) - 0.5).abs() < 1e-3);
    assert_eq!(spec.total_duration(), Duration::from_millis(150));
}
