/// Easing functions for tween animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Cubic ease-in.
    EaseIn,
    /// Cubic ease-out; the sheet's default for the closing tween.
    EaseOut,
    /// Cubic ease-in-out.
    EaseInOut,
    /// Material "standard" curve.
    FastOutSlowIn,
    /// Material "decelerate" curve.
    LinearOutSlowIn,
}

impl Easing {
    /// Maps a linear fraction in `[0, 1]` through the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::LinearOutSlowIn => cubic_bezier(0.0, 0.0, 0.2, 1.0, fraction),
        }
    }
}

/// Evaluates a CSS-style cubic bezier at the given x fraction.
///
/// Newton-Raphson on the x polynomial, with a bisection fallback for the flat
/// regions where the derivative vanishes.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;
    let derivative = |a: f32, b: f32, c: f32, t: f32| (3.0 * a * t + 2.0 * b) * t + c;

    let mut t = fraction;
    let mut converged = false;
    for _ in 0..8 {
        let error = sample(ax, bx, cx, t) - fraction;
        if error.abs() < 1e-6 {
            converged = true;
            break;
        }
        let slope = derivative(ax, bx, cx, t);
        if slope.abs() < 1e-6 {
            break;
        }
        t = (t - error / slope).clamp(0.0, 1.0);
    }

    if !converged {
        let mut lo = 0.0;
        let mut hi = 1.0;
        t = fraction;
        for _ in 0..16 {
            let error = sample(ax, bx, cx, t) - fraction;
            if error.abs() < 1e-6 {
                break;
            }
            if error > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
    }

    sample(ay, by, cy, t)
}

#[cfg(test)]
#[path = "tests/easing_tests.rs"]
mod tests;
