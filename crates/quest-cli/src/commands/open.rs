use anyhow::{anyhow, Result};
use tracing::info;

use quest_core::content::Href;
use quest_core::AppConfig;

use super::parse_section;

pub fn run(config: AppConfig, target: &str) -> Result<()> {
    match target.trim().to_lowercase().as_str() {
        "web-app" | "webapp" | "app" => {
            let url = Href::WebApp
                .resolve(&config.links.web_app_url)
                .ok_or_else(|| anyhow!("no web app url configured"))?
                .to_string();
            println!("Opening {}", url);
            open::that(&url)?;
            info!(url = %url, "opened web app");
            Ok(())
        }
        // in-page anchors open the page itself at that section
        other => {
            let section = parse_section(other)?;
            super::run::run(config, Some(section))
        }
    }
}
