use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

use crate::motion::{
    Easing, InterpolationMap, ScrollOffset, TriggerMode, ViewportMargin,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub links: LinksConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Reveal and parallax tuning for the landing page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Disable to render every section in its final state (reduced motion)
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Easing shared by the fade and scale reveals
    #[serde(default = "default_reveal_easing")]
    pub easing: Easing,
    /// Trigger mode for in-view reveals ("once" or "always")
    #[serde(default)]
    pub trigger: TriggerMode,
    /// Fade-in-up duration in seconds
    #[serde(default = "default_reveal_duration")]
    pub reveal_duration_secs: f64,
    /// Fade-in-up travel distance in pixels
    #[serde(default = "default_reveal_distance")]
    pub reveal_distance_px: f64,
    /// Scale-in duration in seconds
    #[serde(default = "default_scale_duration")]
    pub scale_duration_secs: f64,
    /// Scale-in starting scale
    #[serde(default = "default_scale_from")]
    pub scale_from: f64,
    /// App showcase reveal duration in seconds
    #[serde(default = "default_showcase_duration")]
    pub showcase_duration_secs: f64,
    /// Duration of a stagger container's own fade
    #[serde(default = "default_container_duration")]
    pub container_duration_secs: f64,
    /// Delay increment between staggered children
    #[serde(default = "default_stagger_children")]
    pub stagger_children_secs: f64,
    /// Delay before the first staggered child
    #[serde(default = "default_delay_children")]
    pub delay_children_secs: f64,
    /// Viewport margin for section headers and the showcase
    #[serde(default = "default_section_margin")]
    pub section_margin: ViewportMargin,
    /// Viewport margin for the feature grid
    #[serde(default = "default_grid_margin")]
    pub grid_margin: ViewportMargin,
    /// Navbar slide-in duration in seconds
    #[serde(default = "default_navbar_duration")]
    pub navbar_duration_secs: f64,
    /// Navbar starting vertical offset in pixels
    #[serde(default = "default_navbar_offset")]
    pub navbar_offset_px: f64,
    #[serde(default = "default_navbar_easing")]
    pub navbar_easing: Easing,
    #[serde(default)]
    pub hero: HeroParallaxConfig,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            easing: default_reveal_easing(),
            trigger: TriggerMode::default(),
            reveal_duration_secs: default_reveal_duration(),
            reveal_distance_px: default_reveal_distance(),
            scale_duration_secs: default_scale_duration(),
            scale_from: default_scale_from(),
            showcase_duration_secs: default_showcase_duration(),
            container_duration_secs: default_container_duration(),
            stagger_children_secs: default_stagger_children(),
            delay_children_secs: default_delay_children(),
            section_margin: default_section_margin(),
            grid_margin: default_grid_margin(),
            navbar_duration_secs: default_navbar_duration(),
            navbar_offset_px: default_navbar_offset(),
            navbar_easing: default_navbar_easing(),
            hero: HeroParallaxConfig::default(),
        }
    }
}

/// Scroll-linked drift and fade of the hero content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroParallaxConfig {
    #[serde(default = "default_hero_start")]
    pub start: ScrollOffset,
    #[serde(default = "default_hero_end")]
    pub end: ScrollOffset,
    /// Breakpoints for the vertical offset in pixels
    #[serde(default = "default_hero_translate")]
    pub translate_y: InterpolationMap,
    /// Breakpoints for the opacity
    #[serde(default = "default_hero_opacity")]
    pub opacity: InterpolationMap,
}

impl Default for HeroParallaxConfig {
    fn default() -> Self {
        Self {
            start: default_hero_start(),
            end: default_hero_end(),
            translate_y: default_hero_translate(),
            opacity: default_hero_opacity(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// How many CSS pixels one terminal row stands for
    #[serde(default = "default_px_per_row")]
    pub px_per_row: f64,
    /// "quest-dark" or "quest-light"
    #[serde(default = "default_theme_name")]
    pub theme: String,
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            px_per_row: default_px_per_row(),
            theme: default_theme_name(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Smooth page scrolling in the terminal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate scroll jumps instead of snapping
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Scroll animation duration in milliseconds
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    #[serde(default = "default_scroll_easing")]
    pub easing: Easing,
    /// Rows moved per line scroll
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Frame rate while anything is animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: default_scroll_easing(),
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Hosted web app opened by "Get Started" and the Web App platform entry
    #[serde(default = "default_web_app_url")]
    pub web_app_url: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            web_app_url: default_web_app_url(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

fn default_reveal_easing() -> Easing {
    Easing::DECELERATE
}

fn default_reveal_duration() -> f64 {
    0.6
}

fn default_reveal_distance() -> f64 {
    40.0
}

fn default_scale_duration() -> f64 {
    0.5
}

fn default_scale_from() -> f64 {
    0.9
}

fn default_showcase_duration() -> f64 {
    0.8
}

fn default_container_duration() -> f64 {
    0.3
}

fn default_stagger_children() -> f64 {
    0.12
}

fn default_delay_children() -> f64 {
    0.1
}

fn default_section_margin() -> ViewportMargin {
    ViewportMargin::px(-100.0)
}

fn default_grid_margin() -> ViewportMargin {
    ViewportMargin::px(-50.0)
}

fn default_navbar_duration() -> f64 {
    0.5
}

fn default_navbar_offset() -> f64 {
    -20.0
}

fn default_navbar_easing() -> Easing {
    Easing::EaseOut
}

fn default_hero_start() -> ScrollOffset {
    ScrollOffset::START_START
}

fn default_hero_end() -> ScrollOffset {
    ScrollOffset::END_START
}

fn default_hero_translate() -> InterpolationMap {
    InterpolationMap::from_static(&[(0.0, 0.0), (1.0, 100.0)])
}

fn default_hero_opacity() -> InterpolationMap {
    InterpolationMap::from_static(&[(0.0, 1.0), (0.8, 0.0)])
}

fn default_tick_rate() -> u64 {
    100
}

fn default_px_per_row() -> f64 {
    20.0
}

fn default_theme_name() -> String {
    "quest-dark".to_string()
}

fn default_scroll_duration() -> u64 {
    150
}

fn default_scroll_easing() -> Easing {
    Easing::Cubic
}

fn default_scroll_lines() -> u16 {
    1
}

fn default_animation_fps() -> u32 {
    60
}

fn default_web_app_url() -> String {
    "https://boomsupersonic.quest/".to_string()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/quest/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("quest")
            .join("config.toml")
    }

    /// Reject settings the motion presets cannot be built from
    pub fn validate(&self) -> crate::Result<()> {
        crate::presets::Presets::from_config(&self.motion)?;
        if !(self.ui.px_per_row.is_finite() && self.ui.px_per_row > 0.0) {
            return Err(crate::Error::Config(format!(
                "ui.px_per_row must be positive, got {}",
                self.ui.px_per_row
            )));
        }
        for note in self.ignored_settings() {
            warn!("{}", note);
        }
        Ok(())
    }

    /// Settings that are accepted but have no effect next to other keys
    pub fn ignored_settings(&self) -> Vec<&'static str> {
        let mut notes = Vec::new();
        if self.motion.enabled && self.motion.trigger == TriggerMode::OnMount {
            notes.push(
                "motion.trigger = \"on_mount\" reveals every section on load; \
                 motion.section_margin and motion.grid_margin are ignored",
            );
        }
        if self.ui.scroll.smooth_enabled && self.ui.scroll.animation_duration_ms == 0 {
            notes.push("ui.scroll.smooth_enabled has no effect with animation_duration_ms = 0");
        }
        if self.ui.scroll.animation_fps == 0 {
            notes.push("ui.scroll.animation_fps = 0 falls back to 60 fps");
        }
        notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.motion.enabled);
        assert_eq!(config.motion.easing, Easing::DECELERATE);
        assert_eq!(config.motion.trigger, TriggerMode::Once);
        assert_eq!(config.motion.section_margin, ViewportMargin::px(-100.0));
        assert_eq!(config.ui.scroll.animation_duration_ms, 150);
        assert_eq!(config.ui.scroll.easing, Easing::Cubic);
        assert_eq!(config.links.web_app_url, "https://boomsupersonic.quest/");
        assert_eq!(config.motion.navbar_easing, Easing::EaseOut);
        assert!(config.validate().is_ok());
        assert!(config.ignored_settings().is_empty());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.motion.stagger_children_secs, 0.12);
        assert_eq!(config.motion.delay_children_secs, 0.1);
        assert_eq!(config.ui.px_per_row, 20.0);
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml(
            r#"
            [motion]
            easing = "ease_out"
            trigger = "always"
            section_margin = "-40px"

            [motion.hero]
            opacity = [[0.0, 1.0], [0.5, 0.2]]
            "#,
        )
        .unwrap();
        assert_eq!(config.motion.easing, Easing::EaseOut);
        assert_eq!(config.motion.trigger, TriggerMode::Always);
        assert_eq!(config.motion.section_margin, ViewportMargin::px(-40.0));
        assert_eq!(config.motion.hero.opacity.breakpoints(), &[(0.0, 1.0), (0.5, 0.2)]);
        assert_eq!(config.motion.reveal_duration_secs, 0.6);
    }

    #[test]
    fn test_bezier_easing_from_toml() {
        let config = AppConfig::from_toml(
            "[motion]\neasing = { cubic_bezier = [0.4, 0.0, 0.2, 1.0] }\n",
        )
        .unwrap();
        assert_eq!(config.motion.easing, Easing::CubicBezier([0.4, 0.0, 0.2, 1.0]));
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let bad_map = "[motion.hero]\ntranslate_y = [[0.5, 0.0], [0.2, 100.0]]\n";
        assert!(matches!(AppConfig::from_toml(bad_map), Err(crate::Error::Config(_))));

        let bad_bezier = "[motion]\neasing = { cubic_bezier = [1.5, 0.0, 0.2, 1.0] }\n";
        assert!(AppConfig::from_toml(bad_bezier).is_err());

        let bad_rows = "[ui]\npx_per_row = 0.0\n";
        assert!(AppConfig::from_toml(bad_rows).is_err());
    }

    #[test]
    fn test_conflicting_keys_are_reported() {
        let config = AppConfig::from_toml(
            "[motion]\ntrigger = \"on_mount\"\n\n[ui.scroll]\nanimation_duration_ms = 0\n",
        )
        .unwrap();
        let notes = config.ignored_settings();
        assert_eq!(notes.len(), 2);
        assert!(notes[0].contains("motion.section_margin"));
        assert!(notes[1].contains("smooth_enabled"));

        // reduced motion already mounts everything, so the trigger is moot
        let config = AppConfig::from_toml(
            "[motion]\nenabled = false\ntrigger = \"on_mount\"\n",
        )
        .unwrap();
        assert!(config.ignored_settings().is_empty());
    }

    #[test]
    fn test_roundtrip() {
        let config = AppConfig::default();
        let text = config.to_toml().unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.motion.easing, config.motion.easing);
        assert_eq!(parsed.motion.hero.translate_y, config.motion.hero.translate_y);
        assert_eq!(parsed.motion.grid_margin, config.motion.grid_margin);
        assert_eq!(parsed.links.web_app_url, config.links.web_app_url);
    }
}
