//! Scroll-driven motion engine.
//!
//! # Layers
//!
//! - `easing`, `timing`: pure curve and time helpers
//! - `keyframe`, `transition`, `viewport`: declarative building blocks
//! - `reveal`: enter-on-scroll transitions with staggering
//! - `parallax`: continuous scroll-linked values
//! - `scene`: mounted elements and their scoped subscriptions
//!
//! # Usage
//!
//! ```ignore
//! use quest_core::motion::*;
//!
//! let scene = MotionScene::new();
//! let hero = scene.mount_parallax("hero", parallax, ElementBounds::new(0.0, 640.0));
//! let features = scene.mount_reveal("features", animator, bounds, Instant::now());
//!
//! // on every scroll event or animation frame
//! let frame = scene.dispatch(&Viewport::new(scroll_y, height), Instant::now());
//! let hero_style = frame.get(hero.id()).map(|f| f.root());
//!
//! // unmount
//! drop(features);
//! ```

pub mod easing;
pub mod keyframe;
pub mod parallax;
pub mod reveal;
pub mod scene;
pub mod timing;
pub mod transition;
pub mod viewport;

pub use easing::Easing;
pub use keyframe::{KeyframePair, Keyframe, StyleValues};
pub use parallax::{
    Channel, InterpolationMap, ParallaxSample, ScrollBinding, ScrollOffset, ScrollParallax,
    ScrollRange, ScrollSource,
};
pub use reveal::{RevealAnimator, RevealNode, RevealPhase, StaggerGroup, TriggerMode, Variant};
pub use scene::{ElementId, MotionScene, SceneFrame, StyleFrame, Subscription};
pub use transition::{Stagger, Transition};
pub use viewport::{ElementBounds, Length, Viewport, ViewportMargin};
