//! Transition timing and stagger configuration.

use serde::{Deserialize, Serialize};

use super::easing::Easing;
use super::timing::delayed_progress;
use crate::error::{Error, Result};

/// How a reveal moves from `hidden` to `visible`. Times are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub duration: f64,
    #[serde(default)]
    pub delay: f64,
    #[serde(default)]
    pub easing: Easing,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            duration: 0.3,
            delay: 0.0,
            easing: Easing::Ease,
        }
    }
}

impl Transition {
    pub fn new(duration: f64, easing: Easing) -> Result<Self> {
        let transition = Self {
            duration,
            delay: 0.0,
            easing,
        };
        transition.validate()?;
        Ok(transition)
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(Error::InvalidTransition(format!(
                "duration must be a non-negative number of seconds, got {}",
                self.duration
            )));
        }
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(Error::InvalidTransition(format!(
                "delay must be a non-negative number of seconds, got {}",
                self.delay
            )));
        }
        self.easing.validate()
    }

    /// Seconds from trigger until this transition settles, with an extra
    /// delay on top of its own.
    #[inline]
    pub fn end_time(&self, extra_delay: f64) -> f64 {
        extra_delay + self.delay + self.duration
    }

    /// Eased progress `elapsed` seconds after the trigger.
    #[inline]
    pub fn eased_progress(&self, elapsed: f64, extra_delay: f64) -> f64 {
        let linear = delayed_progress(elapsed, extra_delay + self.delay, self.duration);
        self.easing.apply(linear)
    }
}

/// Per-child delays for a group sharing one trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stagger {
    /// Delay added for each successive child.
    pub stagger_children: f64,
    /// Delay before the first child starts.
    pub delay_children: f64,
}

impl Stagger {
    pub fn new(stagger_children: f64, delay_children: f64) -> Result<Self> {
        let stagger = Self {
            stagger_children,
            delay_children,
        };
        stagger.validate()?;
        Ok(stagger)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("stagger_children", self.stagger_children),
            ("delay_children", self.delay_children),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidTransition(format!(
                    "{} must be a non-negative number of seconds, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Effective start delay of child `index`.
    #[inline]
    pub fn child_delay(&self, index: usize) -> f64 {
        self.delay_children + index as f64 * self.stagger_children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_delay() {
        let stagger = Stagger::new(0.12, 0.1).unwrap();
        for i in 0..6 {
            let expected = 0.1 + 0.12 * i as f64;
            assert!((stagger.child_delay(i) - expected).abs() < 1e-12, "child {}", i);
        }
    }

    #[test]
    fn test_eased_progress_respects_delays() {
        let transition = Transition::new(0.6, Easing::Linear).unwrap().with_delay(0.1);
        assert_eq!(transition.eased_progress(0.2, 0.1), 0.0);
        assert!((transition.eased_progress(0.5, 0.1) - 0.5).abs() < 1e-9);
        assert_eq!(transition.eased_progress(0.9, 0.1), 1.0);
        assert!((transition.end_time(0.1) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Transition::new(-1.0, Easing::Linear).is_err());
        assert!(Transition::new(f64::NAN, Easing::Linear).is_err());
        assert!(Transition::new(0.5, Easing::CubicBezier([2.0, 0.0, 0.5, 1.0])).is_err());
        assert!(Stagger::new(-0.1, 0.0).is_err());
    }

    #[test]
    fn test_zero_duration_is_instant() {
        let transition = Transition::new(0.0, Easing::Ease).unwrap();
        assert_eq!(transition.eased_progress(0.0, 0.0), 1.0);
    }
}
