use ratatui::style::Color;
use tracing::warn;

/// Runtime palette for the landing page
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub muted: Color,

    // Brand gradient ends
    pub primary: Color,
    pub accent: Color,

    // Semantic colors
    pub success: Color,
    pub star: Color,
    pub border: Color,
    pub focus: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::quest_dark()
    }
}

impl Theme {
    pub fn quest_dark() -> Self {
        Self {
            bg0: Color::Rgb(0x0b, 0x0d, 0x17),
            bg1: Color::Rgb(0x13, 0x16, 0x24),
            bg2: Color::Rgb(0x1d, 0x21, 0x33),
            fg0: Color::Rgb(0xf4, 0xf5, 0xfb),
            fg1: Color::Rgb(0xd5, 0xd8, 0xe6),
            muted: Color::Rgb(0x8b, 0x90, 0xa8),
            primary: Color::Rgb(0x8b, 0x5c, 0xf6),
            accent: Color::Rgb(0x22, 0xd3, 0xee),
            success: Color::Rgb(0x22, 0xc5, 0x5e),
            star: Color::Rgb(0xfa, 0xcc, 0x15),
            border: Color::Rgb(0x33, 0x38, 0x52),
            focus: Color::Rgb(0xf4, 0x72, 0xb6),
        }
    }

    pub fn quest_light() -> Self {
        Self {
            bg0: Color::Rgb(0xfa, 0xfa, 0xfc),
            bg1: Color::Rgb(0xf0, 0xf1, 0xf7),
            bg2: Color::Rgb(0xe2, 0xe4, 0xef),
            fg0: Color::Rgb(0x11, 0x13, 0x1f),
            fg1: Color::Rgb(0x2b, 0x2f, 0x42),
            muted: Color::Rgb(0x6b, 0x70, 0x88),
            primary: Color::Rgb(0x6d, 0x28, 0xd9),
            accent: Color::Rgb(0x08, 0x91, 0xb2),
            success: Color::Rgb(0x16, 0xa3, 0x4a),
            star: Color::Rgb(0xca, 0x8a, 0x04),
            border: Color::Rgb(0xc9, 0xcc, 0xdb),
            focus: Color::Rgb(0xdb, 0x27, 0x77),
        }
    }

    /// Look up a theme by its config name, falling back to the dark theme
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().replace('_', "-").as_str() {
            "quest-dark" | "dark" => Self::quest_dark(),
            "quest-light" | "light" => Self::quest_light(),
            other => {
                warn!(theme = other, "unknown theme, using quest-dark");
                Self::quest_dark()
            }
        }
    }

    /// `color` seen through `opacity` over the page background
    pub fn fade(&self, color: Color, opacity: f64) -> Color {
        blend(self.bg0, color, opacity)
    }
}

/// Linear mix from `from` (t = 0) to `to` (t = 1). Non-RGB colors snap at
/// the halfway point.
pub fn blend(from: Color, to: Color, t: f64) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    match (from, to) {
        (Color::Rgb(r0, g0, b0), Color::Rgb(r1, g1, b1)) => {
            let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
            Color::Rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
        }
        _ if t >= 0.5 => to,
        _ => from,
    }
}
