//! Scroll-linked values.
//!
//! A [`ScrollBinding`] turns the target element's layout into a scroll
//! range; progress through that range is fed through one
//! [`InterpolationMap`] per output channel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::keyframe::StyleValues;
use super::timing::{inverse_lerp, lerp};
use super::viewport::ElementBounds;
use crate::error::{Error, Result};

/// Piecewise-linear mapping from progress to an output value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")]
pub struct InterpolationMap {
    breakpoints: Vec<(f64, f64)>,
}

impl InterpolationMap {
    /// Build from `(input_progress, output)` pairs.
    ///
    /// Inputs must be strictly increasing and within [0, 1]; at least two
    /// breakpoints are required.
    pub fn new(breakpoints: Vec<(f64, f64)>) -> Result<Self> {
        if breakpoints.len() < 2 {
            return Err(Error::TooFewBreakpoints(breakpoints.len()));
        }
        for (index, &(input, output)) in breakpoints.iter().enumerate() {
            if !input.is_finite() || !(0.0..=1.0).contains(&input) {
                return Err(Error::BreakpointOutOfRange { index, input });
            }
            if !output.is_finite() {
                return Err(Error::Config(format!(
                    "breakpoint {} output must be finite, got {}",
                    index, output
                )));
            }
            if index > 0 {
                let previous = breakpoints[index - 1].0;
                if input <= previous {
                    return Err(Error::NonMonotonicBreakpoints {
                        index,
                        input,
                        previous,
                    });
                }
            }
        }
        Ok(Self { breakpoints })
    }

    /// Built-in defaults that are known to satisfy [`InterpolationMap::new`].
    pub(crate) fn from_static(breakpoints: &[(f64, f64)]) -> Self {
        debug_assert!(Self::new(breakpoints.to_vec()).is_ok());
        Self {
            breakpoints: breakpoints.to_vec(),
        }
    }

    /// Two-point map from `from` at progress 0 to `to` at progress 1.
    pub fn linear(from: f64, to: f64) -> Result<Self> {
        Self::new(vec![(0.0, from), (1.0, to)])
    }

    pub fn breakpoints(&self) -> &[(f64, f64)] {
        &self.breakpoints
    }

    /// Output at `progress`, clamped to the end breakpoints outside the
    /// covered domain.
    pub fn sample(&self, progress: f64) -> f64 {
        let (first_in, first_out) = self.breakpoints[0];
        let (last_in, last_out) = self.breakpoints[self.breakpoints.len() - 1];

        if progress.is_nan() || progress <= first_in {
            return first_out;
        }
        if progress >= last_in {
            return last_out;
        }

        // first breakpoint whose input is >= progress; always in 1..len
        let upper = self.breakpoints.partition_point(|&(input, _)| input < progress);
        let (x0, y0) = self.breakpoints[upper - 1];
        let (x1, y1) = self.breakpoints[upper];
        if progress == x1 {
            return y1;
        }
        lerp(y0, y1, inverse_lerp(x0, x1, progress))
    }
}

impl TryFrom<Vec<(f64, f64)>> for InterpolationMap {
    type Error = Error;

    fn try_from(value: Vec<(f64, f64)>) -> Result<Self> {
        Self::new(value)
    }
}

impl From<InterpolationMap> for Vec<(f64, f64)> {
    fn from(map: InterpolationMap) -> Self {
        map.breakpoints
    }
}

/// Parses `"0:0,1:100"` style breakpoint lists.
impl FromStr for InterpolationMap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let breakpoints = s
            .split(',')
            .map(|pair| {
                let (input, output) = pair.split_once(':').ok_or_else(|| {
                    Error::Config(format!("breakpoint '{}' must look like input:output", pair))
                })?;
                let parse = |v: &str| {
                    v.trim()
                        .parse::<f64>()
                        .map_err(|e| Error::Config(format!("breakpoint '{}': {}", pair, e)))
                };
                Ok((parse(input)?, parse(output)?))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(breakpoints)
    }
}

/// A point on the element or the viewport, as a fraction of its height.
fn parse_edge(token: &str) -> Result<f64> {
    let value = match token {
        "start" => 0.0,
        "center" => 0.5,
        "end" => 1.0,
        other => other.parse::<f64>().map_err(|_| {
            Error::InvalidScrollOffset(format!("unknown edge '{}'", other))
        })?,
    };
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(Error::InvalidScrollOffset(format!(
            "edge '{}' must be start, center, end or a fraction in [0, 1]",
            token
        )));
    }
    Ok(value)
}

fn format_edge(value: f64) -> String {
    if value == 0.0 {
        "start".to_string()
    } else if value == 0.5 {
        "center".to_string()
    } else if value == 1.0 {
        "end".to_string()
    } else {
        value.to_string()
    }
}

/// "When this edge of the element meets that edge of the viewport."
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScrollOffset {
    pub element: f64,
    pub viewport: f64,
}

impl ScrollOffset {
    pub const START_START: ScrollOffset = ScrollOffset {
        element: 0.0,
        viewport: 0.0,
    };
    pub const END_START: ScrollOffset = ScrollOffset {
        element: 1.0,
        viewport: 0.0,
    };
    pub const START_END: ScrollOffset = ScrollOffset {
        element: 0.0,
        viewport: 1.0,
    };
    pub const END_END: ScrollOffset = ScrollOffset {
        element: 1.0,
        viewport: 1.0,
    };

    /// Scroll position at which the two edges line up.
    #[inline]
    pub fn resolve(&self, bounds: &ElementBounds, viewport_height: f64) -> f64 {
        bounds.top + self.element * bounds.height - self.viewport * viewport_height
    }
}

impl FromStr for ScrollOffset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        match tokens.as_slice() {
            [both] => {
                let edge = parse_edge(both)?;
                Ok(Self {
                    element: edge,
                    viewport: edge,
                })
            }
            [element, viewport] => Ok(Self {
                element: parse_edge(element)?,
                viewport: parse_edge(viewport)?,
            }),
            _ => Err(Error::InvalidScrollOffset(format!(
                "expected '<element edge> <viewport edge>', got '{}'",
                s
            ))),
        }
    }
}

impl TryFrom<String> for ScrollOffset {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for ScrollOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", format_edge(self.element), format_edge(self.viewport))
    }
}

impl From<ScrollOffset> for String {
    fn from(offset: ScrollOffset) -> Self {
        offset.to_string()
    }
}

/// Concrete scroll window in document pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollRange {
    pub start: f64,
    pub end: f64,
}

impl ScrollRange {
    /// An explicit range; `end` must lie past `start`.
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if !start.is_finite() || !end.is_finite() || end <= start {
            return Err(Error::InvalidScrollRange(format!(
                "end ({}) must be greater than start ({})",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// `clamp((scroll - start) / (end - start), 0, 1)`, or 0 for an empty range.
    #[inline]
    pub fn progress(&self, scroll: f64) -> f64 {
        let span = self.end - self.start;
        if span == 0.0 || !span.is_finite() || scroll.is_nan() {
            return 0.0;
        }
        ((scroll - self.start) / span).clamp(0.0, 1.0)
    }
}

/// Start/end offsets relative to a target element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollBinding {
    pub start: ScrollOffset,
    pub end: ScrollOffset,
}

impl ScrollBinding {
    /// Rejects offsets that can never describe a forward range.
    pub fn new(start: ScrollOffset, end: ScrollOffset) -> Result<Self> {
        if start == end {
            return Err(Error::InvalidScrollRange(format!(
                "start and end offsets are both '{}'",
                start
            )));
        }
        if end.element <= start.element && end.viewport >= start.viewport {
            return Err(Error::InvalidScrollRange(format!(
                "'{}' never comes after '{}'",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse both offsets, e.g. `ScrollBinding::parse("start start", "end start")`.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(start.parse()?, end.parse()?)
    }

    /// Resolve against the current layout. The result may be empty for
    /// degenerate layouts (e.g. a zero-height target), which yields
    /// progress 0 rather than an error.
    pub fn resolve(&self, bounds: &ElementBounds, viewport_height: f64) -> ScrollRange {
        ScrollRange {
            start: self.start.resolve(bounds, viewport_height),
            end: self.end.resolve(bounds, viewport_height),
        }
    }
}

/// Where a parallax takes its scroll range from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollSource {
    Element(ScrollBinding),
    Fixed(ScrollRange),
}

impl ScrollSource {
    pub fn range(&self, bounds: &ElementBounds, viewport_height: f64) -> ScrollRange {
        match self {
            Self::Element(binding) => binding.resolve(bounds, viewport_height),
            Self::Fixed(range) => *range,
        }
    }
}

/// Style property a map writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    TranslateY,
    Opacity,
    Scale,
}

impl FromStr for Channel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "y" | "translate_y" | "translate-y" => Ok(Self::TranslateY),
            "opacity" => Ok(Self::Opacity),
            "scale" => Ok(Self::Scale),
            other => Err(Error::Config(format!("unknown parallax channel '{}'", other))),
        }
    }
}

/// Result of one parallax evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParallaxSample {
    pub progress: f64,
    /// One value per map, in declaration order.
    pub values: Vec<f64>,
    pub style: StyleValues,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SampleKey {
    scroll: f64,
    bounds: ElementBounds,
    viewport_height: f64,
}

/// Continuously recomputed, scroll-linked style values.
#[derive(Debug, Clone)]
pub struct ScrollParallax {
    source: ScrollSource,
    channels: Vec<(Channel, InterpolationMap)>,
    last: Option<(SampleKey, ParallaxSample)>,
}

impl ScrollParallax {
    pub fn new(binding: ScrollBinding) -> Self {
        Self::with_source(ScrollSource::Element(binding))
    }

    pub fn fixed(range: ScrollRange) -> Self {
        Self::with_source(ScrollSource::Fixed(range))
    }

    pub fn with_source(source: ScrollSource) -> Self {
        Self {
            source,
            channels: Vec::new(),
            last: None,
        }
    }

    pub fn channel(mut self, channel: Channel, map: InterpolationMap) -> Self {
        self.channels.push((channel, map));
        self.last = None;
        self
    }

    pub fn source(&self) -> &ScrollSource {
        &self.source
    }

    pub fn channels(&self) -> &[(Channel, InterpolationMap)] {
        &self.channels
    }

    /// Pure evaluation at a scroll position.
    pub fn sample(&self, scroll: f64, bounds: &ElementBounds, viewport_height: f64) -> ParallaxSample {
        let progress = self.source.range(bounds, viewport_height).progress(scroll);
        let mut style = StyleValues::IDENTITY;
        let values = self
            .channels
            .iter()
            .map(|(channel, map)| {
                let value = map.sample(progress);
                match channel {
                    Channel::TranslateY => style.translate_y = value,
                    Channel::Opacity => style.opacity = value,
                    Channel::Scale => style.scale = value,
                }
                value
            })
            .collect();

        ParallaxSample {
            progress,
            values,
            style: style.clamped(),
        }
    }

    /// Evaluate, reusing the previous result when nothing changed.
    pub fn update(&mut self, scroll: f64, bounds: &ElementBounds, viewport_height: f64) -> &ParallaxSample {
        let key = SampleKey {
            scroll,
            bounds: *bounds,
            viewport_height,
        };
        let entry = match self.last.take() {
            Some((last, sample)) if last == key => (last, sample),
            _ => (key, self.sample(scroll, bounds, viewport_height)),
        };
        &self.last.insert(entry).1
    }
}
