//! Registry of mounted animated elements.
//!
//! Mounting returns a [`Subscription`]; dropping it unmounts the element,
//! discarding any in-flight transition, so nothing is evaluated for an
//! element after it is gone. The scene is single-threaded by construction.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, warn};

use super::keyframe::StyleValues;
use super::parallax::ScrollParallax;
use super::reveal::RevealAnimator;
use super::viewport::{ElementBounds, Viewport};

/// Identifier handed out at mount time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementId(u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
enum Motion {
    Reveal(RevealAnimator),
    Parallax(ScrollParallax),
}

#[derive(Debug)]
struct Entry {
    id: ElementId,
    label: String,
    bounds: ElementBounds,
    motion: Motion,
}

#[derive(Debug, Default)]
struct SceneState {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Computed values for one mounted element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleFrame {
    pub id: ElementId,
    /// One record for a parallax; one per element (pre-order) for a reveal,
    /// with each child already composed onto its group.
    pub values: Vec<StyleValues>,
}

impl StyleFrame {
    /// The element's own value (the group itself, for a reveal group).
    pub fn root(&self) -> StyleValues {
        self.values.first().copied().unwrap_or_default()
    }

    /// Value for the `index`-th element in pre-order, identity if absent.
    pub fn get(&self, index: usize) -> StyleValues {
        self.values.get(index).copied().unwrap_or_default()
    }
}

/// All frames from one dispatch, in mount order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SceneFrame {
    pub frames: Vec<StyleFrame>,
}

impl SceneFrame {
    pub fn get(&self, id: ElementId) -> Option<&StyleFrame> {
        self.frames.iter().find(|frame| frame.id == id)
    }
}

/// Owner of every mounted reveal and parallax.
#[derive(Debug, Clone, Default)]
pub struct MotionScene {
    state: Rc<RefCell<SceneState>>,
}

impl MotionScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a reveal; on-mount animators fire immediately.
    pub fn mount_reveal(
        &self,
        label: impl Into<String>,
        mut animator: RevealAnimator,
        bounds: ElementBounds,
        now: Instant,
    ) -> Subscription {
        animator.mount(now);
        self.insert(label.into(), bounds, Motion::Reveal(animator))
    }

    pub fn mount_parallax(
        &self,
        label: impl Into<String>,
        parallax: ScrollParallax,
        bounds: ElementBounds,
    ) -> Subscription {
        self.insert(label.into(), bounds, Motion::Parallax(parallax))
    }

    fn insert(&self, label: String, bounds: ElementBounds, motion: Motion) -> Subscription {
        let mut state = self.state.borrow_mut();
        let id = ElementId(state.next_id);
        state.next_id += 1;
        debug!(%id, %label, top = bounds.top, height = bounds.height, "mounted");
        state.entries.push(Entry {
            id,
            label,
            bounds,
            motion,
        });
        Subscription {
            id,
            scene: Rc::downgrade(&self.state),
        }
    }

    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Labels of mounted elements, in mount order.
    pub fn labels(&self) -> Vec<String> {
        self.state
            .borrow()
            .entries
            .iter()
            .map(|entry| entry.label.clone())
            .collect()
    }

    /// Whether any reveal is mid-transition, i.e. frames would change
    /// without a new scroll event.
    pub fn is_animating(&self) -> bool {
        self.state
            .borrow()
            .entries
            .iter()
            .any(|entry| matches!(&entry.motion, Motion::Reveal(r) if r.is_animating()))
    }

    /// Feed the current viewport to every element and collect their values.
    pub fn dispatch(&self, viewport: &Viewport, now: Instant) -> SceneFrame {
        let mut state = self.state.borrow_mut();
        let frames = state
            .entries
            .iter_mut()
            .map(|entry| {
                let values = match &mut entry.motion {
                    Motion::Reveal(animator) => {
                        if animator.observe(viewport, &entry.bounds, now) {
                            debug!(id = %entry.id, label = %entry.label, "revealed");
                        }
                        animator.advance(now);
                        animator.composed_values_at(now)
                    }
                    Motion::Parallax(parallax) => {
                        let sample = parallax.update(viewport.scroll_y, &entry.bounds, viewport.height);
                        vec![sample.style]
                    }
                };
                StyleFrame {
                    id: entry.id,
                    values,
                }
            })
            .collect();
        SceneFrame { frames }
    }
}

/// Keeps an element mounted. Dropping it unmounts the element.
#[derive(Debug)]
pub struct Subscription {
    id: ElementId,
    scene: Weak<RefCell<SceneState>>,
}

impl Subscription {
    #[inline]
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Report the element's new layout after a resize or reflow.
    pub fn set_bounds(&self, bounds: ElementBounds) {
        if let Some(scene) = self.scene.upgrade() {
            if let Some(entry) = scene
                .borrow_mut()
                .entries
                .iter_mut()
                .find(|entry| entry.id == self.id)
            {
                entry.bounds = bounds;
            }
        }
    }

    /// Current layout as the scene sees it.
    pub fn bounds(&self) -> Option<ElementBounds> {
        let scene = self.scene.upgrade()?;
        let state = scene.borrow();
        state
            .entries
            .iter()
            .find(|entry| entry.id == self.id)
            .map(|entry| entry.bounds)
    }

    /// Restart a reveal from its hidden state. No-op for parallax elements.
    pub fn reset(&self) {
        if let Some(scene) = self.scene.upgrade() {
            if let Some(entry) = scene
                .borrow_mut()
                .entries
                .iter_mut()
                .find(|entry| entry.id == self.id)
            {
                if let Motion::Reveal(animator) = &mut entry.motion {
                    animator.reset();
                }
            }
        }
    }

    /// Reset, then fire again right away if the reveal runs on mount.
    /// In-view reveals wait for the next dispatch that sees them.
    pub fn replay(&self, now: Instant) {
        if let Some(scene) = self.scene.upgrade() {
            if let Some(entry) = scene
                .borrow_mut()
                .entries
                .iter_mut()
                .find(|entry| entry.id == self.id)
            {
                if let Motion::Reveal(animator) = &mut entry.motion {
                    animator.reset();
                    animator.mount(now);
                }
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(scene) = self.scene.upgrade() else {
            return;
        };
        let Ok(mut state) = scene.try_borrow_mut() else {
            warn!(id = %self.id, "scene busy during unmount, element left mounted");
            return;
        };
        if let Some(pos) = state.entries.iter().position(|entry| entry.id == self.id) {
            let entry = state.entries.remove(pos);
            debug!(id = %entry.id, label = %entry.label, "unmounted");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::motion::easing::Easing;
    use crate::motion::keyframe::{KeyframePair, Keyframe};
    use crate::motion::parallax::{Channel, InterpolationMap, ScrollBinding};
    use crate::motion::reveal::{TriggerMode, Variant};
    use crate::motion::transition::Transition;

    fn reveal(mode: TriggerMode) -> RevealAnimator {
        let variant = Variant::new(
            KeyframePair::new(
                Keyframe::new().opacity(0.0),
                Keyframe::new().opacity(1.0),
            )
            .unwrap(),
            Transition::new(0.5, Easing::Linear).unwrap(),
        )
        .unwrap();
        RevealAnimator::new(variant, mode)
    }

    #[test]
    fn test_dispatch_in_mount_order() {
        let scene = MotionScene::new();
        let now = Instant::now();
        let a = scene.mount_reveal("a", reveal(TriggerMode::Once), ElementBounds::new(0.0, 100.0), now);
        let b = scene.mount_reveal("b", reveal(TriggerMode::Once), ElementBounds::new(5000.0, 100.0), now);

        let frame = scene.dispatch(&Viewport::new(0.0, 800.0), now + Duration::from_secs(1));
        assert_eq!(frame.frames.len(), 2);
        assert_eq!(frame.frames[0].id, a.id());
        assert_eq!(frame.frames[1].id, b.id());
        assert_eq!(scene.labels(), vec!["a".to_string(), "b".to_string()]);

        // a triggered at dispatch time, so it has only just started
        assert_eq!(frame.get(a.id()).unwrap().root().opacity, 0.0);
        assert_eq!(frame.get(b.id()).unwrap().root().opacity, 0.0);
        assert!(scene.is_animating());
    }

    #[test]
    fn test_drop_unmounts() {
        let scene = MotionScene::new();
        let now = Instant::now();
        let sub = scene.mount_reveal("a", reveal(TriggerMode::Always), ElementBounds::new(0.0, 100.0), now);
        let keep = scene.mount_reveal("b", reveal(TriggerMode::Once), ElementBounds::new(0.0, 100.0), now);
        let dropped_id = sub.id();

        scene.dispatch(&Viewport::new(0.0, 800.0), now);
        drop(sub);

        assert_eq!(scene.len(), 1);
        let frame = scene.dispatch(&Viewport::new(0.0, 800.0), now + Duration::from_millis(100));
        assert!(frame.get(dropped_id).is_none());
        assert!(frame.get(keep.id()).is_some());
    }

    #[test]
    fn test_subscription_outlives_scene() {
        let scene = MotionScene::new();
        let sub = scene.mount_reveal("a", reveal(TriggerMode::Once), ElementBounds::default(), Instant::now());
        drop(scene);
        sub.set_bounds(ElementBounds::new(1.0, 1.0));
        assert!(sub.bounds().is_none());
    }

    #[test]
    fn test_set_bounds_moves_trigger() {
        let scene = MotionScene::new();
        let now = Instant::now();
        let sub = scene.mount_reveal("a", reveal(TriggerMode::Once), ElementBounds::new(5000.0, 100.0), now);
        let viewport = Viewport::new(0.0, 800.0);

        scene.dispatch(&viewport, now);
        assert!(!scene.is_animating());

        sub.set_bounds(ElementBounds::new(100.0, 100.0));
        assert_eq!(sub.bounds(), Some(ElementBounds::new(100.0, 100.0)));
        scene.dispatch(&viewport, now);
        assert!(scene.is_animating());
    }

    #[test]
    fn test_parallax_frame() {
        let scene = MotionScene::new();
        let parallax = ScrollParallax::new(ScrollBinding::parse("start start", "end start").unwrap())
            .channel(Channel::TranslateY, InterpolationMap::linear(0.0, 100.0).unwrap());
        let sub = scene.mount_parallax("hero", parallax, ElementBounds::new(0.0, 1000.0));

        let frame = scene.dispatch(&Viewport::new(500.0, 800.0), Instant::now());
        assert_eq!(frame.get(sub.id()).unwrap().root().translate_y, 50.0);
    }

    #[test]
    fn test_on_mount_fires_at_mount() {
        let scene = MotionScene::new();
        let now = Instant::now();
        let sub = scene.mount_reveal("nav", reveal(TriggerMode::OnMount), ElementBounds::new(9000.0, 10.0), now);
        let frame = scene.dispatch(&Viewport::new(0.0, 100.0), now + Duration::from_millis(250));
        let opacity = frame.get(sub.id()).unwrap().root().opacity;
        assert!((opacity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_replay_restarts_on_mount() {
        let scene = MotionScene::new();
        let now = Instant::now();
        let sub = scene.mount_reveal("nav", reveal(TriggerMode::OnMount), ElementBounds::new(9000.0, 10.0), now);
        let later = now + Duration::from_secs(2);
        scene.dispatch(&Viewport::new(0.0, 100.0), later);

        sub.replay(later);
        let frame = scene.dispatch(&Viewport::new(0.0, 100.0), later + Duration::from_millis(250));
        let opacity = frame.get(sub.id()).unwrap().root().opacity;
        assert!((opacity - 0.5).abs() < 1e-6);

        // a plain reset stays hidden until observed again
        sub.reset();
        let frame = scene.dispatch(&Viewport::new(0.0, 100.0), later + Duration::from_secs(5));
        assert_eq!(frame.get(sub.id()).unwrap().root().opacity, 0.0);
    }
}
