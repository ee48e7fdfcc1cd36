//! Time and interpolation helpers shared by reveal and parallax.

use std::time::Instant;

/// Fraction of `duration_secs` covered after `elapsed_secs`, clamped to [0, 1].
///
/// A zero (or negative) duration counts as already complete.
#[inline]
pub fn progress(elapsed_secs: f64, duration_secs: f64) -> f64 {
    if duration_secs <= 0.0 {
        return if elapsed_secs >= 0.0 { 1.0 } else { 0.0 };
    }
    (elapsed_secs / duration_secs).clamp(0.0, 1.0)
}

/// Progress of a transition that only starts after `delay_secs`.
#[inline]
pub fn delayed_progress(elapsed_secs: f64, delay_secs: f64, duration_secs: f64) -> f64 {
    progress(elapsed_secs - delay_secs, duration_secs)
}

/// Seconds elapsed between `start` and `now`; zero if `now` is earlier.
#[inline]
pub fn elapsed_secs(start: Instant, now: Instant) -> f64 {
    now.saturating_duration_since(start).as_secs_f64()
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Where `value` sits between `from` and `to`, as a fraction. Not clamped.
#[inline]
pub fn inverse_lerp(from: f64, to: f64, value: f64) -> f64 {
    (value - from) / (to - from)
}
