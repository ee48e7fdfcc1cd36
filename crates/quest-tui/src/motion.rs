//! Binds layout slots to the motion scene.

use std::collections::HashMap;
use std::time::Instant;

use anyhow::Result;
use ratatui::layout::Rect;
use tracing::debug;

use quest_core::content::PageContent;
use quest_core::motion::{
    ElementBounds, MotionScene, RevealAnimator, Stagger, StaggerGroup, StyleFrame, StyleValues,
    Subscription, Viewport, ViewportMargin,
};
use quest_core::Presets;

use crate::layout::{PageBlock, PageLayout, Slot};

/// Converts between terminal rows and CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowScale {
    pub px_per_row: f64,
}

impl RowScale {
    pub fn new(px_per_row: f64) -> Self {
        Self { px_per_row }
    }

    #[inline]
    pub fn to_px(&self, rows: u16) -> f64 {
        rows as f64 * self.px_per_row
    }

    /// Nearest whole number of rows for a pixel offset
    #[inline]
    pub fn to_rows(&self, px: f64) -> i32 {
        if self.px_per_row <= 0.0 || !px.is_finite() {
            return 0;
        }
        (px / self.px_per_row).round() as i32
    }

    pub fn bounds(&self, area: Rect) -> ElementBounds {
        ElementBounds::new(self.to_px(area.y), self.to_px(area.height))
    }

    pub fn viewport(&self, scroll_row: u16, rows: u16) -> Viewport {
        Viewport::new(self.to_px(scroll_row), self.to_px(rows))
    }
}

/// Every slot of the page mounted into a scene.
#[derive(Debug)]
pub struct PageMotion {
    subscriptions: Vec<(Slot, Subscription)>,
}

impl PageMotion {
    pub fn mount(
        scene: &MotionScene,
        presets: &Presets,
        content: &PageContent,
        layout: &PageLayout,
        scale: RowScale,
        now: Instant,
    ) -> Result<Self> {
        let mut subscriptions = Vec::with_capacity(Slot::ALL.len());
        for slot in Slot::ALL {
            let bounds = layout
                .slot_area(slot)
                .map(|area| scale.bounds(area))
                .unwrap_or_default();
            let subscription = if slot == Slot::Hero {
                scene.mount_parallax(slot.label(), presets.hero_parallax(), bounds)
            } else {
                let animator = reveal_for(slot, presets, content)?;
                scene.mount_reveal(slot.label(), animator, bounds, now)
            };
            subscriptions.push((slot, subscription));
        }
        debug!(elements = ?scene.labels(), "page motion mounted");
        Ok(Self { subscriptions })
    }

    /// Push new geometry after the layout was rebuilt
    pub fn relayout(&self, layout: &PageLayout, scale: RowScale) {
        for (slot, subscription) in &self.subscriptions {
            if let Some(area) = layout.slot_area(*slot) {
                subscription.set_bounds(scale.bounds(area));
            }
        }
    }

    /// Run every reveal again from its hidden state
    pub fn replay(&self, now: Instant) {
        for (_, subscription) in &self.subscriptions {
            subscription.replay(now);
        }
    }

    pub fn dispatch(&self, scene: &MotionScene, viewport: &Viewport, now: Instant) -> MotionStyles {
        let frame = scene.dispatch(viewport, now);
        let frames = self
            .subscriptions
            .iter()
            .filter_map(|(slot, subscription)| {
                frame
                    .get(subscription.id())
                    .map(|style| (*slot, style.clone()))
            })
            .collect();
        MotionStyles { frames }
    }
}

fn reveal_for(slot: Slot, presets: &Presets, content: &PageContent) -> Result<RevealAnimator> {
    let none = ViewportMargin::default();
    let animator = match slot {
        Slot::Navbar => presets.navbar_intro(),
        Slot::HeroContent => presets.on_mount(presets.fade_group(6)),
        Slot::Showcase => presets.showcase_reveal(),
        Slot::FeaturesHeader => presets.in_view(presets.fade_group(3), presets.section_margin()),
        Slot::FeaturesGrid => {
            presets.in_view(presets.fade_group(content.features.len()), presets.grid_margin())
        }
        Slot::Platforms => {
            let group = presets
                .stagger_container()
                .children_from((0..3).map(|_| presets.fade_in_up()))
                .child(presets.fade_group(content.platforms.len()))
                .child(presets.scale_in());
            presets.in_view(group, none)
        }
        Slot::TestimonialsHeader => presets.in_view(presets.fade_group(3), none),
        Slot::TestimonialsGrid => {
            presets.in_view(presets.fade_group(content.testimonials.len()), none)
        }
        Slot::Cta => {
            // the card scales in and carries its contents along
            let card = StaggerGroup::new(presets.scale_in(), Stagger::default())?
                .children_from((0..4).map(|_| presets.fade_in_up()));
            presets.in_view(presets.stagger_container().child(card), none)
        }
        Slot::Hero => anyhow::bail!("the hero slot is driven by scroll, not by a reveal"),
    };
    Ok(animator)
}

/// Style frames from the latest dispatch, keyed by slot.
#[derive(Debug, Clone, Default)]
pub struct MotionStyles {
    frames: HashMap<Slot, StyleFrame>,
}

impl MotionStyles {
    /// The slot's own value (identity if it was not dispatched)
    pub fn root(&self, slot: Slot) -> StyleValues {
        self.frames
            .get(&slot)
            .map(StyleFrame::root)
            .unwrap_or_default()
    }

    pub fn element(&self, slot: Slot, index: usize) -> StyleValues {
        self.frames
            .get(&slot)
            .map(|frame| frame.get(index))
            .unwrap_or_default()
    }

    /// Effective style of a block: its reveal under its parallax
    pub fn block(&self, block: &PageBlock) -> StyleValues {
        let reveal = block
            .reveal
            .map(|(slot, index)| self.element(slot, index))
            .unwrap_or_default();
        match block.parallax {
            Some(slot) => self.root(slot).compose(&reveal),
            None => reveal,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::theme::Theme;
    use quest_core::{content, MotionConfig};

    #[test]
    fn test_row_scale() {
        let scale = RowScale::new(20.0);
        assert_eq!(scale.to_px(3), 60.0);
        assert_eq!(scale.to_rows(40.0), 2);
        assert_eq!(scale.to_rows(-29.0), -1);
        assert_eq!(scale.to_rows(f64::NAN), 0);
        assert_eq!(scale.bounds(Rect::new(0, 5, 10, 2)), ElementBounds::new(100.0, 40.0));
    }

    #[test]
    fn test_element_counts_match_layout() {
        let presets = Presets::from_config(&MotionConfig::default()).unwrap();
        let page = content::page();
        let layout = PageLayout::build(page, &Theme::default(), 120, 40);
        for slot in Slot::ALL {
            if slot == Slot::Hero {
                continue;
            }
            let animator = reveal_for(slot, &presets, page).unwrap();
            let max_index = layout.reveal_members(slot).map(|(i, _)| i).max().unwrap_or(0);
            assert!(
                max_index < animator.element_count(),
                "{:?}: index {} of {}",
                slot,
                max_index,
                animator.element_count()
            );
        }
    }

    #[test]
    fn test_mount_and_dispatch() {
        let presets = Presets::from_config(&MotionConfig::default()).unwrap();
        let page = content::page();
        let layout = PageLayout::build(page, &Theme::default(), 120, 40);
        let scale = RowScale::new(20.0);
        let scene = MotionScene::new();
        let now = Instant::now();

        let motion = PageMotion::mount(&scene, &presets, page, &layout, scale, now).unwrap();
        assert_eq!(scene.len(), Slot::ALL.len());

        let styles = motion.dispatch(&scene, &scale.viewport(0, 40), now + Duration::from_secs(5));
        // navbar and hero content fire on mount and have settled
        assert_eq!(styles.root(Slot::Navbar), StyleValues::IDENTITY);
        assert_eq!(styles.element(Slot::HeroContent, 6), StyleValues::IDENTITY);
        // features are far below the fold
        assert_eq!(styles.element(Slot::FeaturesGrid, 1).opacity, 0.0);

        drop(motion);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_block_style_composes_parallax() {
        let presets = Presets::from_config(&MotionConfig::default()).unwrap();
        let page = content::page();
        let layout = PageLayout::build(page, &Theme::default(), 120, 40);
        let scale = RowScale::new(20.0);
        let scene = MotionScene::new();
        let now = Instant::now();
        let motion = PageMotion::mount(&scene, &presets, page, &layout, scale, now).unwrap();

        let hero_rows = layout.slot_area(Slot::Hero).unwrap().height;
        let styles = motion.dispatch(&scene, &scale.viewport(hero_rows / 2, 40), now + Duration::from_secs(5));
        let (_, badge) = layout.reveal_members(Slot::HeroContent).next().unwrap();
        let style = styles.block(badge);
        assert!((style.translate_y - 50.0).abs() < 1e-9);
        assert!(style.opacity < 1.0);
    }
}
