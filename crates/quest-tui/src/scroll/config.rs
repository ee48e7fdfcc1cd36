use std::time::Duration;

pub use quest_core::ScrollConfig;

/// Convenience accessors for [`ScrollConfig`]
pub trait ScrollConfigExt {
    fn animation_duration(&self) -> Duration;

    /// Poll interval while something is animating
    fn animation_tick_duration(&self) -> Duration;

    /// Smooth scrolling is on and has a non-zero duration
    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    fn animation_tick_duration(&self) -> Duration {
        match self.animation_fps {
            0 => Duration::from_millis(16),
            fps => Duration::from_millis((1000 / fps as u64).max(1)),
        }
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        let config = ScrollConfig::default();
        assert_eq!(config.animation_tick_duration(), Duration::from_millis(16));

        let config = ScrollConfig {
            animation_fps: 0,
            ..Default::default()
        };
        assert_eq!(config.animation_tick_duration(), Duration::from_millis(16));

        let config = ScrollConfig {
            animation_fps: 5000,
            ..Default::default()
        };
        assert_eq!(config.animation_tick_duration(), Duration::from_millis(1));
    }

    #[test]
    fn test_is_smooth() {
        let mut config = ScrollConfig::default();
        assert!(config.is_smooth());

        config.animation_duration_ms = 0;
        assert!(!config.is_smooth());

        config.animation_duration_ms = 150;
        config.smooth_enabled = false;
        assert!(!config.is_smooth());
    }
}
