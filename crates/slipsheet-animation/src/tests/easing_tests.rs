use super::*;

const CURVES: [Easing; 6] = [
    Easing::Linear,
    Easing::EaseIn,
    Easing::EaseOut,
    Easing::EaseInOut,
    Easing::FastOutSlowIn,
    Easing::LinearOutSlowIn,
];

#[test]
fn all_curves_pin_the_endpoints() {
    for curve in CURVES {
        assert_eq!(curve.transform(0.0), 0.0, "{curve:?} at 0");
        assert_eq!(curve.transform(1.0), 1.0, "{curve:?} at 1");
        assert_eq!(curve.transform(-0.5), 0.0, "{curve:?} below range");
        assert_eq!(curve.transform(1.5), 1.0, "{curve:?} above range");
    }
}

#[test]
fn all_curves_are_monotonic_within_range() {
    for curve in CURVES {
        let mut previous = 0.0;
        for i in 1..=100 {
            let value = curve.transform(i as f32 / 100.0);
            assert!(
                value >= previous - 1e-4,
                "{curve:?} decreased at step {i}: {previous} -> {value}"
            );
            previous = value;
        }
    }
}

#[test]
fn linear_is_identity() {
    for i in 0..=10 {
        let fraction = i as f32 / 10.0;
        assert!((Easing::Linear.transform(fraction) - fraction).abs() < 1e-6);
    }
}

#[test]
fn ease_out_front_loads_progress() {
    // Decelerating curves are ahead of linear through the middle.
    for fraction in [0.25, 0.5, 0.75] {
        assert!(Easing::EaseOut.transform(fraction) > fraction);
        assert!(Easing::LinearOutSlowIn.transform(fraction) >= fraction);
    }
}

#[test]
fn ease_in_back_loads_progress() {
    for fraction in [0.25, 0.5, 0.75] {
        assert!(Easing::EaseIn.transform(fraction) < fraction);
    }
}
