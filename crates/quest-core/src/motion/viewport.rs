//! Viewport geometry and visibility detection.
//!
//! All coordinates are document-space CSS pixels along the scroll axis.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Visible window of the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_y: f64, height: f64) -> Self {
        Self {
            scroll_y,
            height: height.max(0.0),
        }
    }

    /// Document range considered "in view" once `margin` is applied.
    ///
    /// Positive margins grow the band, negative ones shrink it, like CSS
    /// `rootMargin`.
    pub fn band(&self, margin: &ViewportMargin) -> (f64, f64) {
        let start = self.scroll_y - margin.top.resolve(self.height);
        let end = self.scroll_y + self.height + margin.bottom.resolve(self.height);
        (start, end)
    }

    /// Fraction of `bounds` inside the margin-adjusted band.
    pub fn intersection_ratio(&self, bounds: &ElementBounds, margin: &ViewportMargin) -> f64 {
        let (start, end) = self.band(margin);
        if end <= start {
            return 0.0;
        }
        if bounds.height <= 0.0 {
            return if bounds.top >= start && bounds.top <= end {
                1.0
            } else {
                0.0
            };
        }
        let overlap = (bounds.bottom().min(end) - bounds.top.max(start)).max(0.0);
        (overlap / bounds.height).clamp(0.0, 1.0)
    }

    /// Whether `bounds` counts as visible.
    ///
    /// `amount` is the fraction of the element that must be inside; zero
    /// means any overlap at all.
    pub fn is_in_view(&self, bounds: &ElementBounds, margin: &ViewportMargin, amount: f64) -> bool {
        let ratio = self.intersection_ratio(bounds, margin);
        if amount <= 0.0 {
            ratio > 0.0
        } else {
            ratio >= amount.min(1.0)
        }
    }
}

/// Position and extent of an element along the scroll axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementBounds {
    pub top: f64,
    pub height: f64,
}

impl ElementBounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// A CSS length in the units root margins accept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    /// Percentage of the viewport height.
    Percent(f64),
}

impl Length {
    pub const ZERO: Length = Length::Px(0.0);

    #[inline]
    pub fn resolve(&self, viewport_height: f64) -> f64 {
        match self {
            Self::Px(px) => *px,
            Self::Percent(pct) => viewport_height * pct / 100.0,
        }
    }
}

impl FromStr for Length {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || Error::InvalidMargin(format!("'{}' is not a px or % length", s));

        let (number, unit): (&str, fn(f64) -> Length) = if let Some(n) = s.strip_suffix("px") {
            (n, Length::Px)
        } else if let Some(n) = s.strip_suffix('%') {
            (n, Length::Percent)
        } else {
            (s, Length::Px)
        };

        let value: f64 = number.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        // bare numbers are only valid for zero
        if number.len() == s.len() && value != 0.0 {
            return Err(invalid());
        }
        Ok(unit(value))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{}px", v),
            Self::Percent(v) => write!(f, "{}%", v),
        }
    }
}

/// Adjustment of the visibility boundary, in CSS `rootMargin` syntax.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ViewportMargin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl Default for ViewportMargin {
    fn default() -> Self {
        Self::uniform(Length::ZERO)
    }
}

impl ViewportMargin {
    pub fn uniform(length: Length) -> Self {
        Self {
            top: length,
            right: length,
            bottom: length,
            left: length,
        }
    }

    /// Margin shrinking (negative) or growing (positive) every edge by `px`.
    pub fn px(px: f64) -> Self {
        Self::uniform(Length::Px(px))
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl FromStr for ViewportMargin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts = s
            .split_whitespace()
            .map(str::parse::<Length>)
            .collect::<Result<Vec<_>>>()?;

        let (top, right, bottom, left) = match parts.as_slice() {
            [all] => (*all, *all, *all, *all),
            [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
            [top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
            [top, right, bottom, left] => (*top, *right, *bottom, *left),
            _ => {
                return Err(Error::InvalidMargin(format!(
                    "expected 1 to 4 lengths, got '{}'",
                    s
                )))
            }
        };

        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl TryFrom<String> for ViewportMargin {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for ViewportMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.top == self.right && self.top == self.bottom && self.top == self.left {
            write!(f, "{}", self.top)
        } else {
            write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
        }
    }
}

impl From<ViewportMargin> for String {
    fn from(margin: ViewportMargin) -> Self {
        margin.to_string()
    }
}
