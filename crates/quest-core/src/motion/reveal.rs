//! Enter-on-scroll reveal animations.
//!
//! A [`RevealAnimator`] owns a tree of [`RevealNode`]s: single elements or
//! staggered groups whose children start one after another from a shared
//! trigger. The animator tracks the trigger state machine; the tree only
//! knows how to turn "seconds since trigger" into style values.
//!
//! ```text
//! UNTRIGGERED -> ANIMATING -> SETTLED                      (once, on-mount)
//! UNTRIGGERED -> ANIMATING -> (SETTLED) -> UNTRIGGERED     (always, on exit)
//! ```

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::keyframe::{KeyframePair, StyleValues};
use super::timing::elapsed_secs;
use super::transition::{Stagger, Transition};
use super::viewport::{ElementBounds, Viewport, ViewportMargin};
use crate::error::{Error, Result};

/// When a reveal fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerMode {
    /// First time the element comes into view; never again.
    #[default]
    Once,
    /// Every time it comes into view; snaps back to hidden on exit.
    Always,
    /// As soon as it is mounted, regardless of visibility.
    OnMount,
}

/// Where an animator is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPhase {
    Untriggered,
    Animating,
    Settled,
}

/// Keyframes plus the transition that moves between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Variant {
    keyframes: KeyframePair,
    transition: Transition,
}

impl Variant {
    pub fn new(keyframes: KeyframePair, transition: Transition) -> Result<Self> {
        transition.validate()?;
        Ok(Self {
            keyframes,
            transition,
        })
    }

    /// A variant that never changes the element.
    pub fn identity() -> Self {
        Self {
            keyframes: KeyframePair::identity(),
            transition: Transition {
                duration: 0.0,
                ..Transition::default()
            },
        }
    }

    #[inline]
    pub fn keyframes(&self) -> &KeyframePair {
        &self.keyframes
    }

    #[inline]
    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    /// Values `elapsed` seconds after the trigger, with `offset` seconds of
    /// inherited stagger delay.
    #[inline]
    pub fn sample(&self, elapsed: f64, offset: f64) -> StyleValues {
        self.keyframes
            .at(self.transition.eased_progress(elapsed, offset))
    }
}

/// A group of children sharing one trigger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaggerGroup {
    variant: Variant,
    stagger: Stagger,
    children: Vec<RevealNode>,
}

impl StaggerGroup {
    /// `variant` animates the group element itself; children are appended
    /// with [`StaggerGroup::child`].
    pub fn new(variant: Variant, stagger: Stagger) -> Result<Self> {
        stagger.validate()?;
        Ok(Self {
            variant,
            stagger,
            children: Vec::new(),
        })
    }

    pub fn child(mut self, node: impl Into<RevealNode>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children_from<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<RevealNode>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn stagger(&self) -> &Stagger {
        &self.stagger
    }

    pub fn children(&self) -> &[RevealNode] {
        &self.children
    }
}

/// One element, or a staggered group of elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RevealNode {
    Single(Variant),
    Group(StaggerGroup),
}

impl From<Variant> for RevealNode {
    fn from(variant: Variant) -> Self {
        Self::Single(variant)
    }
}

impl From<StaggerGroup> for RevealNode {
    fn from(group: StaggerGroup) -> Self {
        Self::Group(group)
    }
}

impl RevealNode {
    /// Number of elements in this subtree, the node itself included.
    pub fn element_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Group(group) => 1 + group.children.iter().map(Self::element_count).sum::<usize>(),
        }
    }

    /// Effective start delay of every element, in pre-order.
    pub fn delays(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.element_count());
        self.collect_delays(0.0, &mut out);
        out
    }

    fn collect_delays(&self, offset: f64, out: &mut Vec<f64>) {
        match self {
            Self::Single(variant) => out.push(offset + variant.transition.delay),
            Self::Group(group) => {
                out.push(offset + group.variant.transition.delay);
                for (i, child) in group.children.iter().enumerate() {
                    child.collect_delays(offset + group.stagger.child_delay(i), out);
                }
            }
        }
    }

    /// Seconds after the trigger at which every element has settled.
    pub fn settle_time(&self) -> f64 {
        self.settle_time_from(0.0)
    }

    fn settle_time_from(&self, offset: f64) -> f64 {
        match self {
            Self::Single(variant) => variant.transition.end_time(offset),
            Self::Group(group) => group
                .children
                .iter()
                .enumerate()
                .map(|(i, child)| child.settle_time_from(offset + group.stagger.child_delay(i)))
                .fold(group.variant.transition.end_time(offset), f64::max),
        }
    }

    /// Push one style record per element, in pre-order.
    ///
    /// `elapsed` is seconds since the trigger, or `None` while untriggered.
    /// With `parent` set, each record is composed onto its ancestors so the
    /// result is what ends up on screen.
    pub fn sample_into(
        &self,
        elapsed: Option<f64>,
        parent: Option<StyleValues>,
        out: &mut Vec<StyleValues>,
    ) {
        self.sample_from(elapsed, 0.0, parent, out);
    }

    fn sample_from(
        &self,
        elapsed: Option<f64>,
        offset: f64,
        parent: Option<StyleValues>,
        out: &mut Vec<StyleValues>,
    ) {
        let variant = match self {
            Self::Single(variant) => variant,
            Self::Group(group) => &group.variant,
        };
        let own = match elapsed {
            Some(elapsed) => variant.sample(elapsed, offset),
            None => variant.keyframes.hidden(),
        };
        let value = parent.map_or(own, |p| p.compose(&own));
        out.push(value);

        if let Self::Group(group) = self {
            let inherited = parent.map(|_| value);
            for (i, child) in group.children.iter().enumerate() {
                child.sample_from(
                    elapsed,
                    offset + group.stagger.child_delay(i),
                    inherited,
                    out,
                );
            }
        }
    }
}

/// Drives a [`RevealNode`] tree from visibility changes.
#[derive(Debug, Clone)]
pub struct RevealAnimator {
    node: RevealNode,
    mode: TriggerMode,
    margin: ViewportMargin,
    amount: f64,
    phase: RevealPhase,
    triggered_at: Option<Instant>,
    in_view: bool,
    settle_time: f64,
}

impl RevealAnimator {
    pub fn new(node: impl Into<RevealNode>, mode: TriggerMode) -> Self {
        let node = node.into();
        let settle_time = node.settle_time();
        Self {
            node,
            mode,
            margin: ViewportMargin::default(),
            amount: 0.0,
            phase: RevealPhase::Untriggered,
            triggered_at: None,
            in_view: false,
            settle_time,
        }
    }

    pub fn with_margin(mut self, margin: ViewportMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Fraction of the element that must be inside the band to count as
    /// visible (0 = any overlap).
    pub fn with_amount(mut self, amount: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&amount) {
            return Err(Error::Config(format!(
                "reveal amount must be within [0, 1], got {}",
                amount
            )));
        }
        self.amount = amount;
        Ok(self)
    }

    #[inline]
    pub fn mode(&self) -> TriggerMode {
        self.mode
    }

    #[inline]
    pub fn margin(&self) -> &ViewportMargin {
        &self.margin
    }

    #[inline]
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    #[inline]
    pub fn node(&self) -> &RevealNode {
        &self.node
    }

    /// Number of style records produced per sample.
    #[inline]
    pub fn element_count(&self) -> usize {
        self.node.element_count()
    }

    /// Whether frames still change over time without new scroll events.
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.phase == RevealPhase::Animating
    }

    /// Called when the element is attached to the page.
    pub fn mount(&mut self, now: Instant) {
        if self.mode == TriggerMode::OnMount && self.phase == RevealPhase::Untriggered {
            self.fire(now);
        }
    }

    /// Evaluate visibility against the viewport and feed it to the state
    /// machine. Returns true when this call fired the transition.
    pub fn observe(&mut self, viewport: &Viewport, bounds: &ElementBounds, now: Instant) -> bool {
        let visible = viewport.is_in_view(bounds, &self.margin, self.amount);
        self.set_in_view(visible, now)
    }

    /// Report a visibility change. Returns true when the transition fired.
    pub fn set_in_view(&mut self, visible: bool, now: Instant) -> bool {
        let entered = visible && !self.in_view;
        let exited = !visible && self.in_view;
        self.in_view = visible;

        match self.mode {
            TriggerMode::OnMount => false,
            TriggerMode::Once => {
                if entered && self.phase == RevealPhase::Untriggered {
                    self.fire(now);
                    true
                } else {
                    false
                }
            }
            TriggerMode::Always => {
                if entered {
                    self.fire(now);
                    true
                } else {
                    if exited {
                        debug!("reveal left view, reverting to hidden");
                        self.reset();
                    }
                    false
                }
            }
        }
    }

    /// Advance the state machine to `now` and return the per-element values
    /// in pre-order.
    pub fn update(&mut self, now: Instant) -> Vec<StyleValues> {
        self.advance(now);
        self.values_at(now)
    }

    /// Settle a finished transition without sampling any values.
    pub fn advance(&mut self, now: Instant) {
        if let (RevealPhase::Animating, Some(start)) = (self.phase, self.triggered_at) {
            if elapsed_secs(start, now) >= self.settle_time {
                self.phase = RevealPhase::Settled;
            }
        }
    }

    /// Per-element values at `now`, without touching the phase.
    pub fn values_at(&self, now: Instant) -> Vec<StyleValues> {
        let mut out = Vec::with_capacity(self.element_count());
        self.node.sample_into(self.elapsed(now), None, &mut out);
        out
    }

    /// Like [`values_at`](Self::values_at), but each child is composed onto
    /// its group, giving the effective on-screen values.
    pub fn composed_values_at(&self, now: Instant) -> Vec<StyleValues> {
        let mut out = Vec::with_capacity(self.element_count());
        self.node
            .sample_into(self.elapsed(now), Some(StyleValues::IDENTITY), &mut out);
        out
    }

    /// Back to the hidden keyframes, ready to fire again.
    pub fn reset(&mut self) {
        self.phase = RevealPhase::Untriggered;
        self.triggered_at = None;
    }

    fn elapsed(&self, now: Instant) -> Option<f64> {
        match self.phase {
            RevealPhase::Untriggered => None,
            RevealPhase::Settled => Some(f64::INFINITY),
            RevealPhase::Animating => self.triggered_at.map(|start| elapsed_secs(start, now)),
        }
    }

    fn fire(&mut self, now: Instant) {
        debug!(
            mode = ?self.mode,
            elements = self.element_count(),
            settle_secs = self.settle_time,
            "reveal triggered"
        );
        self.phase = RevealPhase::Animating;
        self.triggered_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::motion::easing::Easing;
    use crate::motion::keyframe::Keyframe;

    fn fade_up() -> Variant {
        Variant::new(
            KeyframePair::new(
                Keyframe::new().opacity(0.0).y(40.0),
                Keyframe::new().opacity(1.0).y(0.0),
            )
            .unwrap(),
            Transition::new(0.6, Easing::Linear).unwrap(),
        )
        .unwrap()
    }

    fn container() -> Variant {
        Variant::new(
            KeyframePair::new(
                Keyframe::new().opacity(0.0),
                Keyframe::new().opacity(1.0),
            )
            .unwrap(),
            Transition::new(0.3, Easing::Linear).unwrap(),
        )
        .unwrap()
    }

    fn at(start: Instant, millis: u64) -> Instant {
        start + Duration::from_millis(millis)
    }

    #[test]
    fn test_starts_hidden() {
        let animator = RevealAnimator::new(fade_up(), TriggerMode::Once);
        let values = animator.values_at(Instant::now());
        assert_eq!(values, vec![fade_up().keyframes().hidden()]);
        assert_eq!(animator.phase(), RevealPhase::Untriggered);
    }

    #[test]
    fn test_once_animates_then_settles() {
        let start = Instant::now();
        let mut animator = RevealAnimator::new(fade_up(), TriggerMode::Once);

        assert!(animator.set_in_view(true, start));
        assert_eq!(animator.phase(), RevealPhase::Animating);

        let mid = animator.update(at(start, 300))[0];
        assert!((mid.opacity - 0.5).abs() < 1e-6);
        assert!((mid.translate_y - 20.0).abs() < 1e-4);

        let done = animator.update(at(start, 700))[0];
        assert_eq!(done, StyleValues::IDENTITY);
        assert_eq!(animator.phase(), RevealPhase::Settled);
    }

    #[test]
    fn test_advance_settles_phase() {
        let start = Instant::now();
        let mut animator = RevealAnimator::new(fade_up(), TriggerMode::Once);
        animator.advance(at(start, 1000));
        assert_eq!(animator.phase(), RevealPhase::Untriggered);

        assert!(animator.set_in_view(true, start));
        animator.advance(at(start, 599));
        assert_eq!(animator.phase(), RevealPhase::Animating);
        animator.advance(at(start, 600));
        assert_eq!(animator.phase(), RevealPhase::Settled);
        assert_eq!(animator.composed_values_at(at(start, 600)), vec![StyleValues::IDENTITY]);
    }

    #[test]
    fn test_once_does_not_refire() {
        let start = Instant::now();
        let mut animator = RevealAnimator::new(fade_up(), TriggerMode::Once);

        assert!(animator.set_in_view(true, start));
        animator.update(at(start, 1000));
        assert!(!animator.set_in_view(false, at(start, 1100)));
        assert!(!animator.set_in_view(true, at(start, 1200)));

        assert_eq!(animator.phase(), RevealPhase::Settled);
        assert_eq!(animator.update(at(start, 1210))[0], StyleValues::IDENTITY);
    }

    #[test]
    fn test_always_reverts_on_exit_and_refires() {
        let start = Instant::now();
        let mut animator = RevealAnimator::new(fade_up(), TriggerMode::Always);

        animator.set_in_view(true, start);
        animator.update(at(start, 1000));
        assert!(!animator.set_in_view(false, at(start, 1100)));

        assert_eq!(animator.phase(), RevealPhase::Untriggered);
        assert_eq!(
            animator.update(at(start, 1100))[0],
            fade_up().keyframes().hidden()
        );

        assert!(animator.set_in_view(true, at(start, 1200)));
        assert_eq!(animator.phase(), RevealPhase::Animating);
    }

    #[test]
    fn test_staying_in_view_does_not_retrigger() {
        let start = Instant::now();
        let mut animator = RevealAnimator::new(fade_up(), TriggerMode::Always);
        assert!(animator.set_in_view(true, start));
        assert!(!animator.set_in_view(true, at(start, 100)));
        let values = animator.update(at(start, 300))[0];
        assert!((values.opacity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_on_mount_ignores_visibility() {
        let start = Instant::now();
        let mut animator = RevealAnimator::new(fade_up(), TriggerMode::OnMount);
        assert!(!animator.set_in_view(true, start));
        assert_eq!(animator.phase(), RevealPhase::Untriggered);

        animator.mount(start);
        assert_eq!(animator.phase(), RevealPhase::Animating);
        animator.set_in_view(false, at(start, 100));
        assert_eq!(animator.phase(), RevealPhase::Animating);
    }

    #[test]
    fn test_stagger_delays() {
        let group = StaggerGroup::new(container(), Stagger::new(0.12, 0.1).unwrap())
            .unwrap()
            .children_from((0..4).map(|_| fade_up()));
        let node = RevealNode::from(group);

        let delays = node.delays();
        assert_eq!(delays.len(), 5);
        assert_eq!(delays[0], 0.0);
        for i in 0..4 {
            assert!((delays[i + 1] - (0.1 + 0.12 * i as f64)).abs() < 1e-12);
        }
        // last child: 0.1 + 3 * 0.12 + 0.6
        assert!((node.settle_time() - 1.06).abs() < 1e-9);
    }

    #[test]
    fn test_stagger_children_share_trigger() {
        let start = Instant::now();
        let group = StaggerGroup::new(container(), Stagger::new(0.12, 0.1).unwrap())
            .unwrap()
            .children_from((0..3).map(|_| fade_up()));
        let mut animator = RevealAnimator::new(group, TriggerMode::Once);

        animator.set_in_view(true, start);
        // 150ms: first child 50ms in, second not started
        let values = animator.update(at(start, 150));
        assert!(values[1].opacity > 0.0);
        assert_eq!(values[2], fade_up().keyframes().hidden());
        assert_eq!(values[3], fade_up().keyframes().hidden());

        let settled = animator.update(at(start, 2000));
        assert!(settled.iter().all(|v| v.opacity == 1.0));
        assert_eq!(animator.phase(), RevealPhase::Settled);
    }

    #[test]
    fn test_nested_groups_inherit_delay() {
        let inner = StaggerGroup::new(container(), Stagger::new(0.12, 0.1).unwrap())
            .unwrap()
            .child(fade_up())
            .child(fade_up());
        let outer = StaggerGroup::new(container(), Stagger::new(0.12, 0.1).unwrap())
            .unwrap()
            .child(fade_up())
            .child(inner);
        let node = RevealNode::from(outer);

        assert_eq!(node.element_count(), 5);
        let delays = node.delays();
        // outer, child0, inner (0.22), inner child0 (0.32), inner child1 (0.44)
        let expected = [0.0, 0.1, 0.22, 0.32, 0.44];
        for (got, want) in delays.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{} != {}", got, want);
        }
    }

    #[test]
    fn test_composed_values_multiply_opacity() {
        let start = Instant::now();
        let group = StaggerGroup::new(container(), Stagger::default())
            .unwrap()
            .child(fade_up());
        let mut animator = RevealAnimator::new(group, TriggerMode::Once);
        animator.set_in_view(true, start);

        let raw = animator.values_at(at(start, 150));
        let composed = animator.composed_values_at(at(start, 150));
        assert!((composed[1].opacity - raw[0].opacity * raw[1].opacity).abs() < 1e-9);
    }

    #[test]
    fn test_observe_uses_margin() {
        let start = Instant::now();
        let mut animator = RevealAnimator::new(fade_up(), TriggerMode::Once)
            .with_margin(ViewportMargin::px(-100.0));
        let bounds = ElementBounds::new(750.0, 200.0);

        assert!(!animator.observe(&Viewport::new(0.0, 800.0), &bounds, start));
        assert!(animator.observe(&Viewport::new(100.0, 800.0), &bounds, at(start, 16)));
    }

    #[test]
    fn test_amount_must_be_fraction() {
        assert!(RevealAnimator::new(fade_up(), TriggerMode::Once)
            .with_amount(1.5)
            .is_err());
    }
}
