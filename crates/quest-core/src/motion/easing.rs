//! Easing curves mapping linear progress in [0, 1] to eased progress.
//!
//! Named curves cover the usual polynomial ease-outs and the CSS keywords;
//! `CubicBezier` takes the same four control values as CSS
//! `cubic-bezier(x1, y1, x2, y2)`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Easing function applied to transition and scroll progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Holds the start value until progress reaches 1.
    None,
    Linear,
    /// f(t) = 1 - (1-t)³
    Cubic,
    /// f(t) = 1 - (1-t)⁵
    Quintic,
    /// f(t) = 1 - 2^(-10t)
    ExpoOut,
    /// CSS `ease`, cubic-bezier(0.25, 0.1, 0.25, 1)
    Ease,
    /// CSS `ease-in`, cubic-bezier(0.42, 0, 1, 1)
    EaseIn,
    /// CSS `ease-out`, cubic-bezier(0, 0, 0.58, 1)
    EaseOut,
    /// CSS `ease-in-out`, cubic-bezier(0.42, 0, 0.58, 1)
    EaseInOut,
    /// Custom curve `[x1, y1, x2, y2]`; x values must lie in [0, 1].
    CubicBezier([f64; 4]),
}

impl Default for Easing {
    fn default() -> Self {
        Self::Ease
    }
}

impl Easing {
    /// Fast start with a long, soft landing. Used by the landing page reveals.
    pub const DECELERATE: Easing = Easing::CubicBezier([0.22, 1.0, 0.36, 1.0]);

    /// Build a validated custom bezier curve.
    pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self> {
        let easing = Self::CubicBezier([x1, y1, x2, y2]);
        easing.validate()?;
        Ok(easing)
    }

    /// Reject control points that would make the curve non-functional in x.
    pub fn validate(&self) -> Result<()> {
        if let Self::CubicBezier(points) = self {
            if points.iter().any(|p| !p.is_finite()) {
                return Err(Error::InvalidEasing(format!(
                    "control points must be finite, got {:?}",
                    points
                )));
            }
            let [x1, _, x2, _] = *points;
            if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                return Err(Error::InvalidEasing(format!(
                    "bezier x values must be in [0, 1], got x1={} x2={}",
                    x1, x2
                )));
            }
        }
        Ok(())
    }

    /// Apply the easing function to a progress value.
    ///
    /// Input is clamped to [0, 1]. Output is exactly 0 at t=0 (except
    /// `None`, which also returns 0) and exactly 1 at t=1. Bezier curves with
    /// y control points outside [0, 1] may overshoot in between.
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::None => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            Self::Linear => t,
            Self::Cubic => cubic_ease_out(t),
            Self::Quintic => quintic_ease_out(t),
            Self::ExpoOut => exponential_ease_out(t),
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::CubicBezier([x1, y1, x2, y2]) => cubic_bezier(*x1, *y1, *x2, *y2, t),
        }
    }
}

#[inline]
fn cubic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

#[inline]
fn quintic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv * inv
}

#[inline]
fn exponential_ease_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

/// Evaluate a unit cubic bezier at horizontal position `progress`.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, progress: f64) -> f64 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }
    let t = solve_bezier_x(x1, x2, progress);
    bezier_component(y1, y2, t)
}

/// Find the curve parameter whose x equals `target_x`.
///
/// Newton-Raphson first; falls back to bisection when the derivative
/// flattens out, which x(t) being monotone on [0, 1] makes safe.
fn solve_bezier_x(x1: f64, x2: f64, target_x: f64) -> f64 {
    const EPSILON: f64 = 1e-9;

    let mut t = target_x;
    for _ in 0..8 {
        let x = bezier_component(x1, x2, t) - target_x;
        if x.abs() < EPSILON {
            return t;
        }
        let dx = bezier_derivative(x1, x2, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    t = target_x;
    for _ in 0..64 {
        let x = bezier_component(x1, x2, t);
        if (x - target_x).abs() < EPSILON {
            break;
        }
        if x < target_x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    t
}

/// One axis of the bezier: 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_component(p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

#[inline]
fn bezier_derivative(p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 10] = [
        Easing::None,
        Easing::Linear,
        Easing::Cubic,
        Easing::Quintic,
        Easing::ExpoOut,
        Easing::Ease,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::DECELERATE,
    ];

    #[test]
    fn test_easing_boundaries() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{:?} at t=0", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 0..=20 {
                let t = i as f64 / 20.0;
                let v = easing.apply(t);
                assert!(v + 1e-9 >= prev, "{:?} not monotonic at t={}", easing, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(Easing::Ease.apply(-0.5), 0.0);
        assert_eq!(Easing::Ease.apply(1.5), 1.0);
        assert_eq!(Easing::Linear.apply(f64::NAN), 0.0);
    }

    #[test]
    fn test_linear_bezier_matches_linear() {
        let easing = Easing::cubic_bezier(0.0, 0.0, 1.0, 1.0).unwrap();
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert!((easing.apply(t) - t).abs() < 1e-6, "t={}", t);
        }
    }

    #[test]
    fn test_decelerate_front_loads_progress() {
        let mid = Easing::DECELERATE.apply(0.5);
        assert!(mid > 0.85, "expected a strong ease-out, got {}", mid);
        assert!(mid < 1.0);
    }

    #[test]
    fn test_ease_in_out_symmetry() {
        let early = Easing::EaseInOut.apply(0.25);
        let late = Easing::EaseInOut.apply(0.75);
        assert!((early + late - 1.0).abs() < 1e-4);
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_invalid_bezier_rejected() {
        assert!(Easing::cubic_bezier(1.2, 0.0, 0.5, 1.0).is_err());
        assert!(Easing::cubic_bezier(0.2, 0.0, -0.1, 1.0).is_err());
        assert!(Easing::cubic_bezier(0.2, f64::NAN, 0.5, 1.0).is_err());
        // y values may overshoot
        assert!(Easing::cubic_bezier(0.3, -0.5, 0.7, 1.5).is_ok());
    }

    #[test]
    fn test_none_jumps_at_end() {
        assert_eq!(Easing::None.apply(0.99), 0.0);
        assert_eq!(Easing::None.apply(1.0), 1.0);
    }
}
