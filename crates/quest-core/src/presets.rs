//! Ready-made motion for the landing page, built from [`MotionConfig`].
//!
//! Everything is validated once in [`Presets::from_config`]; the accessors
//! hand out fresh copies and cannot fail.

use crate::config::MotionConfig;
use crate::error::Result;
use crate::motion::{
    Channel, Easing, KeyframePair, Keyframe, RevealAnimator, RevealNode, ScrollBinding,
    ScrollParallax, Stagger, StaggerGroup, Transition, TriggerMode, Variant, ViewportMargin,
};

#[derive(Debug, Clone)]
pub struct Presets {
    fade_in_up: Variant,
    scale_in: Variant,
    showcase: Variant,
    navbar: Variant,
    container: StaggerGroup,
    hero: ScrollParallax,
    trigger: TriggerMode,
    section_margin: ViewportMargin,
    grid_margin: ViewportMargin,
    reduced_motion: bool,
}

impl Presets {
    pub fn from_config(config: &MotionConfig) -> Result<Self> {
        config.easing.validate()?;
        let reduced_motion = !config.enabled;

        // with motion disabled every transition collapses to zero length and
        // every reveal fires on mount, so the page renders settled
        config.navbar_easing.validate()?;
        let tween_with = |duration: f64, easing: Easing| -> Result<Transition> {
            let duration = if reduced_motion { 0.0 } else { duration };
            Transition::new(duration, easing)
        };
        let tween = |duration: f64| tween_with(duration, config.easing);

        let fade_in_up = Variant::new(
            KeyframePair::new(
                Keyframe::new().opacity(0.0).y(config.reveal_distance_px),
                Keyframe::new().opacity(1.0).y(0.0),
            )?,
            tween(config.reveal_duration_secs)?,
        )?;

        let scale_in = Variant::new(
            KeyframePair::new(
                Keyframe::new().opacity(0.0).scale(config.scale_from),
                Keyframe::new().opacity(1.0).scale(1.0),
            )?,
            tween(config.scale_duration_secs)?,
        )?;

        let showcase = Variant::new(*fade_in_up.keyframes(), tween(config.showcase_duration_secs)?)?;

        let navbar = Variant::new(
            KeyframePair::new(
                Keyframe::new().opacity(0.0).y(config.navbar_offset_px),
                Keyframe::new().opacity(1.0).y(0.0),
            )?,
            tween_with(config.navbar_duration_secs, config.navbar_easing)?,
        )?;

        let container_tween = if reduced_motion {
            Transition::new(0.0, Easing::Ease)?
        } else {
            Transition::new(config.container_duration_secs, Easing::Ease)?
        };
        let container_variant = Variant::new(
            KeyframePair::new(
                Keyframe::new().opacity(0.0),
                Keyframe::new().opacity(1.0),
            )?,
            container_tween,
        )?;
        let stagger = if reduced_motion {
            Stagger::default()
        } else {
            Stagger::new(config.stagger_children_secs, config.delay_children_secs)?
        };
        let container = StaggerGroup::new(container_variant, stagger)?;

        let binding = ScrollBinding::new(config.hero.start, config.hero.end)?;
        let hero = if reduced_motion {
            ScrollParallax::new(binding)
        } else {
            ScrollParallax::new(binding)
                .channel(Channel::TranslateY, config.hero.translate_y.clone())
                .channel(Channel::Opacity, config.hero.opacity.clone())
        };

        Ok(Self {
            fade_in_up,
            scale_in,
            showcase,
            navbar,
            container,
            hero,
            trigger: config.trigger,
            section_margin: config.section_margin,
            grid_margin: config.grid_margin,
            reduced_motion,
        })
    }

    /// Fade in while rising from below.
    pub fn fade_in_up(&self) -> Variant {
        self.fade_in_up
    }

    /// Fade in while growing to full size.
    pub fn scale_in(&self) -> Variant {
        self.scale_in
    }

    /// Slow rise used by the app preview.
    pub fn showcase(&self) -> Variant {
        self.showcase
    }

    /// Empty container that staggers whatever is added to it.
    pub fn stagger_container(&self) -> StaggerGroup {
        self.container.clone()
    }

    /// Container whose children all fade in from below.
    pub fn fade_group(&self, children: usize) -> StaggerGroup {
        self.stagger_container()
            .children_from((0..children).map(|_| self.fade_in_up))
    }

    pub fn section_margin(&self) -> ViewportMargin {
        self.section_margin
    }

    pub fn grid_margin(&self) -> ViewportMargin {
        self.grid_margin
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Reveal that fires when the element scrolls into view.
    pub fn in_view(&self, node: impl Into<RevealNode>, margin: ViewportMargin) -> RevealAnimator {
        if self.reduced_motion {
            return self.on_mount(node);
        }
        RevealAnimator::new(node, self.trigger).with_margin(margin)
    }

    /// Reveal that fires as soon as the element is mounted.
    pub fn on_mount(&self, node: impl Into<RevealNode>) -> RevealAnimator {
        RevealAnimator::new(node, TriggerMode::OnMount)
    }

    /// The navbar slides down into place on load.
    pub fn navbar_intro(&self) -> RevealAnimator {
        self.on_mount(self.navbar)
    }

    /// The app preview rises in slowly once it is well inside the viewport.
    pub fn showcase_reveal(&self) -> RevealAnimator {
        if self.reduced_motion {
            return self.on_mount(self.showcase);
        }
        RevealAnimator::new(self.showcase, TriggerMode::Once).with_margin(self.section_margin)
    }

    /// Hero content drifts down and fades out as it scrolls away.
    pub fn hero_parallax(&self) -> ScrollParallax {
        self.hero.clone()
    }
}
