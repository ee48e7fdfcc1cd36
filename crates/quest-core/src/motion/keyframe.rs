//! Keyframes: the visual states an element moves between.

use serde::{Deserialize, Serialize};

use super::timing::lerp;
use crate::error::{Error, Result};

/// Style-value record applied by the rendering layer.
///
/// `translate_y` is in CSS pixels; positive moves the element down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleValues {
    pub opacity: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for StyleValues {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl StyleValues {
    /// Fully opaque, untransformed.
    pub const IDENTITY: StyleValues = StyleValues {
        opacity: 1.0,
        translate_y: 0.0,
        scale: 1.0,
    };

    pub fn new(opacity: f64, translate_y: f64, scale: f64) -> Self {
        Self {
            opacity,
            translate_y,
            scale,
        }
    }

    /// Interpolate towards `to`. `t` may leave [0, 1] for overshooting curves;
    /// opacity is clamped regardless.
    pub fn lerp(&self, to: &Self, t: f64) -> Self {
        Self {
            opacity: lerp(self.opacity, to.opacity, t),
            translate_y: lerp(self.translate_y, to.translate_y, t),
            scale: lerp(self.scale, to.scale, t),
        }
        .clamped()
    }

    /// Opacity forced into [0, 1], scale kept non-negative.
    pub fn clamped(self) -> Self {
        Self {
            opacity: self.opacity.clamp(0.0, 1.0),
            translate_y: self.translate_y,
            scale: self.scale.max(0.0),
        }
    }

    /// Compose a parent's visual state onto a child's.
    ///
    /// Opacity and scale multiply, translations add, matching how nested
    /// transformed elements appear on screen.
    pub fn compose(&self, child: &Self) -> Self {
        Self {
            opacity: self.opacity * child.opacity,
            translate_y: self.translate_y + child.translate_y,
            scale: self.scale * child.scale,
        }
        .clamped()
    }
}

/// Declared form of a keyframe. Unset fields are resolved against the
/// opposite keyframe when the pair is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, alias = "y", skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

impl Keyframe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn y(mut self, translate_y: f64) -> Self {
        self.translate_y = Some(translate_y);
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }
}

/// The `hidden` / `visible` endpoints of a reveal.
///
/// Immutable once built: there are no setters, only constructors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeyframePair {
    hidden: StyleValues,
    visible: StyleValues,
}

impl KeyframePair {
    /// Resolve two declarations into a pair.
    ///
    /// A property declared on only one side has no interpolation endpoint
    /// and is rejected. Properties omitted on both sides stay at identity.
    pub fn new(hidden: Keyframe, visible: Keyframe) -> Result<Self> {
        let (h_opacity, v_opacity) =
            resolve_field("opacity", hidden.opacity, visible.opacity, 1.0)?;
        let (h_y, v_y) = resolve_field("translate_y", hidden.translate_y, visible.translate_y, 0.0)?;
        let (h_scale, v_scale) = resolve_field("scale", hidden.scale, visible.scale, 1.0)?;

        Ok(Self {
            hidden: StyleValues::new(h_opacity, h_y, h_scale).clamped(),
            visible: StyleValues::new(v_opacity, v_y, v_scale).clamped(),
        })
    }

    /// A pair that does not change anything; useful for static elements.
    pub fn identity() -> Self {
        Self {
            hidden: StyleValues::IDENTITY,
            visible: StyleValues::IDENTITY,
        }
    }

    #[inline]
    pub fn hidden(&self) -> StyleValues {
        self.hidden
    }

    #[inline]
    pub fn visible(&self) -> StyleValues {
        self.visible
    }

    /// Visual state at eased progress `t` (0 = hidden, 1 = visible).
    ///
    /// The endpoints are returned exactly rather than through `lerp`.
    #[inline]
    pub fn at(&self, t: f64) -> StyleValues {
        if t == 0.0 {
            self.hidden
        } else if t == 1.0 {
            self.visible
        } else {
            self.hidden.lerp(&self.visible, t)
        }
    }
}

fn resolve_field(
    field: &'static str,
    hidden: Option<f64>,
    visible: Option<f64>,
    identity: f64,
) -> Result<(f64, f64)> {
    let pair = match (hidden, visible) {
        (Some(h), Some(v)) => (h, v),
        (None, None) => (identity, identity),
        (Some(_), None) => {
            return Err(Error::MissingKeyframeField {
                keyframe: "visible",
                field,
            })
        }
        (None, Some(_)) => {
            return Err(Error::MissingKeyframeField {
                keyframe: "hidden",
                field,
            })
        }
    };

    if !pair.0.is_finite() {
        return Err(Error::NonFiniteKeyframe {
            keyframe: "hidden",
            field,
        });
    }
    if !pair.1.is_finite() {
        return Err(Error::NonFiniteKeyframe {
            keyframe: "visible",
            field,
        });
    }
    Ok(pair)
}
