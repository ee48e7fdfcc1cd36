pub mod config;
pub mod content;
pub mod open;
pub mod parallax;
pub mod reveal;
pub mod run;

use anyhow::{anyhow, Result};

use quest_core::content::Section;

/// Section named by its navbar anchor, e.g. `features` or `#pricing`
pub fn parse_section(name: &str) -> Result<Section> {
    let name = name.trim().to_lowercase();
    match name.as_str() {
        "top" | "hero" | "home" => Ok(Section::Hero),
        "showcase" => Ok(Section::Showcase),
        "cta" => Ok(Section::Cta),
        "footer" => Ok(Section::Footer),
        other => Section::from_anchor(other).ok_or_else(|| {
            anyhow!(
                "unknown section '{}' (expected features, platforms, testimonials or pricing)",
                other
            )
        }),
    }
}
