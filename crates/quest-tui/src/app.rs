use std::time::Instant;

use anyhow::Result;
use tracing::{debug, warn};

use quest_core::content::{self, Href, PageContent, Section};
use quest_core::motion::{MotionScene, Viewport};
use quest_core::{AppConfig, Presets};

use crate::input::Action;
use crate::layout::{PageLayout, NAVBAR_ROWS};
use crate::motion::{MotionStyles, PageMotion, RowScale};
use crate::scroll::ScrollAnimator;
use crate::theme::Theme;

/// Rows below the page taken by the status bar
pub const STATUS_ROWS: u16 = 1;

pub struct App {
    pub config: AppConfig,
    pub theme: Theme,
    pub content: &'static PageContent,
    pub presets: Presets,
    pub scene: MotionScene,
    pub motion: PageMotion,
    pub layout: PageLayout,
    pub scroll: ScrollAnimator,
    pub scale: RowScale,
    /// Terminal size
    pub viewport_width: u16,
    pub viewport_height: u16,
    /// Index into `layout.links`
    pub focused_link: Option<usize>,
    /// Pending key for multi-key commands (e.g., 'g' for 'gg')
    pub pending_key: Option<char>,
    pub status_message: Option<String>,
    pub should_quit: bool,
    /// Styles from the most recent dispatch
    pub styles: MotionStyles,
}

impl App {
    pub fn new(config: AppConfig, width: u16, height: u16, now: Instant) -> Result<Self> {
        let theme = Theme::from_name(&config.ui.theme);
        let presets = Presets::from_config(&config.motion)?;
        let content = content::page();
        let scale = RowScale::new(config.ui.px_per_row);
        let page_rows = height.saturating_sub(STATUS_ROWS);
        let layout = PageLayout::build(content, &theme, width, page_rows);

        let scene = MotionScene::new();
        let motion = PageMotion::mount(&scene, &presets, content, &layout, scale, now)?;
        let scroll = ScrollAnimator::new(config.ui.scroll.clone());

        let mut app = Self {
            config,
            theme,
            content,
            presets,
            scene,
            motion,
            layout,
            scroll,
            scale,
            viewport_width: width,
            viewport_height: height,
            focused_link: None,
            pending_key: None,
            status_message: None,
            should_quit: false,
            styles: MotionStyles::default(),
        };
        app.dispatch(now);
        Ok(app)
    }

    /// Rows of page visible above the status bar
    pub fn page_rows(&self) -> u16 {
        self.viewport_height.saturating_sub(STATUS_ROWS)
    }

    pub fn max_scroll(&self) -> u16 {
        self.layout.height.saturating_sub(self.page_rows())
    }

    pub fn viewport(&self) -> Viewport {
        self.scale.viewport(self.scroll.current_scroll(), self.page_rows())
    }

    /// Section under the navbar
    pub fn current_section(&self) -> Option<Section> {
        self.layout
            .section_at(self.scroll.current_scroll().saturating_add(NAVBAR_ROWS))
    }

    pub fn resize(&mut self, width: u16, height: u16, now: Instant) {
        if width == self.viewport_width && height == self.viewport_height {
            return;
        }
        self.viewport_width = width;
        self.viewport_height = height;
        self.layout = PageLayout::build(self.content, &self.theme, width, self.page_rows());
        // animators keep their phase; only their geometry changes
        self.motion.relayout(&self.layout, self.scale);
        let max = self.max_scroll();
        if self.scroll.current_scroll() > max {
            self.scroll.set_scroll(max);
        }
        debug!(width, height, page_height = self.layout.height, "layout rebuilt");
        self.dispatch(now);
    }

    /// Advance scrolling and motion to `now`
    pub fn tick(&mut self, now: Instant) {
        let max = self.max_scroll();
        self.scroll.update_at(max, now);
        self.dispatch(now);
    }

    fn dispatch(&mut self, now: Instant) {
        let viewport = self.viewport();
        self.styles = self.motion.dispatch(&self.scene, &viewport, now);
    }

    /// Whether the next frame should come at animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.scroll.needs_update() || self.scene.is_animating()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        if action != Action::PendingG {
            self.clear_pending_key();
        }
        if action != Action::None {
            self.clear_status();
        }

        let rows = self.page_rows();
        let max = self.max_scroll();
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.scroll_by(self.scroll.line_step()),
            Action::ScrollUp => self.scroll_by(-self.scroll.line_step()),
            Action::HalfPageDown => self.scroll_by(ScrollAnimator::half_page_step(rows)),
            Action::HalfPageUp => self.scroll_by(-ScrollAnimator::half_page_step(rows)),
            Action::PageDown => self.scroll_by(ScrollAnimator::full_page_step(rows)),
            Action::PageUp => self.scroll_by(-ScrollAnimator::full_page_step(rows)),
            Action::JumpToTop => self.scroll.scroll_to(0, max),
            Action::JumpToBottom => self.scroll.scroll_to(max, max),
            Action::PendingG => self.pending_key = Some('g'),
            Action::JumpToSection(section) => self.jump_to(section),
            Action::NextLink => self.cycle_link(1),
            Action::PrevLink => self.cycle_link(-1),
            Action::OpenLink => self.open_focused(),
            Action::Replay => {
                self.motion.replay(now);
                self.set_status("Replaying animations");
            }
            Action::None => {}
        }
        self.tick(now);
    }

    /// Relative scroll in rows, batched until the next tick
    pub fn scroll_by(&mut self, delta: i32) {
        self.scroll.scroll_by(delta);
    }

    pub fn jump_to(&mut self, section: Section) {
        match self.layout.section_top(section) {
            Some(top) => {
                let max = self.max_scroll();
                self.scroll.scroll_to(top, max);
            }
            None => warn!(?section, "section is not laid out"),
        }
    }

    /// Move focus `step` links forward, wrapping around
    pub fn cycle_link(&mut self, step: isize) {
        let count = self.layout.links.len();
        if count == 0 {
            return;
        }
        let next = match self.focused_link {
            Some(current) => (current as isize + step).rem_euclid(count as isize) as usize,
            None if step >= 0 => 0,
            None => count - 1,
        };
        self.focused_link = Some(next);
        self.reveal_link(next);
    }

    /// Scroll until the link's block is clear of the navbar and status bar
    fn reveal_link(&mut self, index: usize) {
        let Some(block) = self.layout.links[index]
            .block
            .and_then(|block| self.layout.blocks.get(block))
        else {
            return;
        };
        let area = block.area;
        let scroll = self.scroll.target_scroll();
        let rows = self.page_rows();
        let max = self.max_scroll();
        if area.y < scroll.saturating_add(NAVBAR_ROWS) {
            self.scroll.scroll_to(area.y.saturating_sub(NAVBAR_ROWS), max);
        } else if area.bottom() > scroll.saturating_add(rows) {
            self.scroll.scroll_to(area.bottom().saturating_sub(rows), max);
        }
    }

    pub fn open_focused(&mut self) {
        let Some(link) = self.focused_link.and_then(|i| self.layout.links.get(i)).cloned() else {
            self.set_status("No link selected (Tab to cycle links)");
            return;
        };
        match link.href {
            Href::Anchor(section) => self.jump_to(section),
            Href::Placeholder => self.set_status(format!("{}: coming soon", link.label)),
            Href::WebApp => {
                let Some(url) = link.href.resolve(&self.config.links.web_app_url) else {
                    return;
                };
                let url = url.to_string();
                match open::that(&url) {
                    Ok(()) => self.set_status(format!("Opened {}", url)),
                    Err(e) => {
                        warn!(error = %e, url = %url, "failed to open link");
                        self.set_status(format!("Failed to open browser: {}", e));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::layout::Slot;
    use quest_core::motion::StyleValues;

    fn config(reduced: bool) -> AppConfig {
        let mut config = AppConfig::default();
        config.motion.enabled = !reduced;
        config.ui.scroll.smooth_enabled = false;
        config
    }

    #[test]
    fn test_new_mounts_every_slot() {
        let app = App::new(config(false), 120, 41, Instant::now()).unwrap();
        assert_eq!(app.scene.len(), Slot::ALL.len());
        let labels: Vec<String> = Slot::ALL.iter().map(|slot| slot.label().to_string()).collect();
        assert_eq!(app.scene.labels(), labels);
        assert_eq!(app.page_rows(), 40);
        assert!(app.max_scroll() > 0);
    }

    #[test]
    fn test_jump_to_section() {
        let now = Instant::now();
        let mut app = App::new(config(false), 120, 41, now).unwrap();
        app.handle_action(Action::JumpToSection(Section::Platforms), now);
        let top = app.layout.section_top(Section::Platforms).unwrap();
        assert_eq!(app.scroll.current_scroll(), top.min(app.max_scroll()));
        assert_eq!(app.current_section(), Some(Section::Platforms));
    }

    #[test]
    fn test_scroll_reveals_features() {
        let now = Instant::now();
        let mut app = App::new(config(false), 120, 41, now).unwrap();
        assert_eq!(app.styles.element(Slot::FeaturesGrid, 1).opacity, 0.0);

        app.handle_action(Action::JumpToSection(Section::Features), now);
        assert!(app.scene.is_animating());
        assert!(app.needs_fast_update());

        app.tick(now + Duration::from_secs(5));
        assert_eq!(app.styles.element(Slot::FeaturesGrid, 1), StyleValues::IDENTITY);
        assert!(!app.needs_fast_update());
    }

    #[test]
    fn test_reduced_motion_is_settled() {
        let now = Instant::now();
        let app = App::new(config(true), 120, 41, now).unwrap();
        for slot in Slot::ALL {
            assert_eq!(app.styles.root(slot), StyleValues::IDENTITY, "{:?}", slot);
        }
        assert_eq!(app.styles.element(Slot::FeaturesGrid, 3), StyleValues::IDENTITY);
    }

    #[test]
    fn test_pending_g() {
        let now = Instant::now();
        let mut app = App::new(config(false), 120, 41, now).unwrap();
        app.handle_action(Action::JumpToBottom, now);
        assert_eq!(app.scroll.current_scroll(), app.max_scroll());

        app.handle_action(Action::PendingG, now);
        assert_eq!(app.pending_key, Some('g'));
        app.handle_action(Action::JumpToTop, now);
        assert_eq!(app.pending_key, None);
        assert_eq!(app.scroll.current_scroll(), 0);
    }

    #[test]
    fn test_cycle_links_wraps_and_scrolls() {
        let now = Instant::now();
        let mut app = App::new(config(false), 120, 41, now).unwrap();
        let count = app.layout.links.len();

        app.handle_action(Action::PrevLink, now);
        assert_eq!(app.focused_link, Some(count - 1));
        // the last link sits in the call to action near the bottom
        assert!(app.scroll.current_scroll() > 0);

        app.handle_action(Action::NextLink, now);
        assert_eq!(app.focused_link, Some(0));
    }

    #[test]
    fn test_placeholder_link_sets_status() {
        let now = Instant::now();
        let mut app = App::new(config(false), 120, 41, now).unwrap();
        let demo = app
            .layout
            .links
            .iter()
            .position(|link| link.href == Href::Placeholder)
            .unwrap();
        app.focused_link = Some(demo);
        app.handle_action(Action::OpenLink, now);
        assert_eq!(app.status_message.as_deref(), Some("Watch Demo: coming soon"));
    }

    #[test]
    fn test_resize_keeps_phase() {
        let now = Instant::now();
        let mut app = App::new(config(false), 120, 41, now).unwrap();
        app.handle_action(Action::JumpToSection(Section::Features), now);
        app.tick(now + Duration::from_secs(5));

        app.resize(80, 30, now + Duration::from_secs(6));
        assert_eq!(app.scene.len(), Slot::ALL.len());
        let labels: Vec<String> = Slot::ALL.iter().map(|slot| slot.label().to_string()).collect();
        assert_eq!(app.scene.labels(), labels);
        assert!(app.scroll.current_scroll() <= app.max_scroll());
        assert_eq!(app.styles.element(Slot::FeaturesGrid, 1), StyleValues::IDENTITY);
    }

    #[test]
    fn test_replay_restarts_navbar() {
        let now = Instant::now();
        let mut app = App::new(config(false), 120, 41, now).unwrap();
        let later = now + Duration::from_secs(5);
        app.tick(later);
        assert_eq!(app.styles.root(Slot::Navbar), StyleValues::IDENTITY);

        app.handle_action(Action::Replay, later);
        assert_eq!(app.styles.root(Slot::Navbar).opacity, 0.0);
        assert!(app.needs_fast_update());
    }

    #[test]
    fn test_quit() {
        let now = Instant::now();
        let mut app = App::new(config(false), 120, 41, now).unwrap();
        app.handle_action(Action::Quit, now);
        assert!(app.should_quit);
    }
}
