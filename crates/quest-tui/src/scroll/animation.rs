use std::time::{Duration, Instant};

use quest_core::motion::{timing, Easing};

use super::config::{ScrollConfig, ScrollConfigExt};

#[derive(Debug, Clone)]
struct Glide {
    start: Instant,
    from: u16,
    to: u16,
    duration: Duration,
    easing: Easing,
}

impl Glide {
    fn position_at(&self, now: Instant) -> Option<u16> {
        let elapsed = timing::elapsed_secs(self.start, now);
        let t = timing::progress(elapsed, self.duration.as_secs_f64());
        if t >= 1.0 {
            return None;
        }
        let eased = self.easing.apply(t);
        Some(timing::lerp(self.from as f64, self.to as f64, eased).round() as u16)
    }
}

/// Row-based scroll position with optional easing between targets.
#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    glide: Option<Glide>,
    config: ScrollConfig,
    current: u16,
    /// Deltas requested since the last frame
    pending_delta: i32,
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.glide.is_some()
    }

    /// Whether the next frame would move the page
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.glide.is_some() || self.pending_delta != 0
    }

    #[inline]
    pub fn current_scroll(&self) -> u16 {
        self.current
    }

    /// Where the page ends up once the current glide finishes
    pub fn target_scroll(&self) -> u16 {
        self.glide.as_ref().map_or(self.current, |g| g.to)
    }

    /// Jump without animating
    pub fn set_scroll(&mut self, row: u16) {
        self.glide = None;
        self.pending_delta = 0;
        self.current = row;
    }

    /// Glide to an absolute row
    pub fn scroll_to(&mut self, target: u16, max_scroll: u16) {
        self.pending_delta = 0;
        self.start_glide(target.min(max_scroll), Instant::now());
    }

    /// Queue a relative move; applied on the next [`update`](Self::update)
    pub fn scroll_by(&mut self, delta: i32) {
        self.pending_delta = self.pending_delta.saturating_add(delta);
    }

    /// Rows moved by a single line scroll
    pub fn line_step(&self) -> i32 {
        self.config.scroll_lines.max(1) as i32
    }

    pub fn half_page_step(viewport_height: u16) -> i32 {
        (viewport_height / 2).max(1) as i32
    }

    pub fn full_page_step(viewport_height: u16) -> i32 {
        viewport_height.saturating_sub(1).max(1) as i32
    }

    /// Advance to the current time and return the visible top row
    pub fn update(&mut self, max_scroll: u16) -> u16 {
        self.update_at(max_scroll, Instant::now())
    }

    pub fn update_at(&mut self, max_scroll: u16, now: Instant) -> u16 {
        if self.pending_delta != 0 {
            let target = (self.target_scroll() as i32 + self.pending_delta)
                .clamp(0, max_scroll as i32) as u16;
            self.pending_delta = 0;
            self.start_glide(target, now);
        }

        if let Some(glide) = &self.glide {
            match glide.position_at(now) {
                Some(row) => self.current = row,
                None => {
                    self.current = glide.to;
                    self.glide = None;
                }
            }
        }

        self.current = self.current.min(max_scroll);
        self.current
    }

    fn start_glide(&mut self, target: u16, now: Instant) {
        if !self.config.is_smooth() || target == self.current {
            self.glide = None;
            self.current = target;
            return;
        }
        self.glide = Some(Glide {
            start: now,
            from: self.current,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
    }
}
