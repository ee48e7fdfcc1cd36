use anyhow::Result;
use tracing::info;

use quest_core::AppConfig;

pub fn run(config: &AppConfig, write: bool) -> Result<()> {
    if !write {
        println!("# {}", AppConfig::config_path().display());
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let path = AppConfig::config_path();
    if path.exists() {
        println!("Config already exists at {}; leaving it untouched.", path.display());
        return Ok(());
    }
    AppConfig::default().save()?;
    info!(path = %path.display(), "wrote default config");
    println!("Wrote default config to {}", path.display());
    Ok(())
}
