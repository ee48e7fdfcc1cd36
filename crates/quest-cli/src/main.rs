use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use quest_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "quest")]
#[command(author, version, about = "The Quest landing page, rendered in your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the landing page TUI
    Run {
        /// Start scrolled to a section (features, platforms, testimonials, pricing)
        #[arg(short = 's', long)]
        section: Option<String>,
    },
    /// Evaluate a parallax interpolation map at a scroll position
    Parallax {
        /// Scroll position in pixels
        #[arg(long, allow_hyphen_values = true)]
        scroll: f64,
        /// Scroll position where progress is 0
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        start: f64,
        /// Scroll position where progress is 1
        #[arg(long, default_value_t = 1000.0, allow_hyphen_values = true)]
        end: f64,
        /// Breakpoints as input:output pairs
        #[arg(long, default_value = "0:0,1:100")]
        map: String,
        /// Style property the map drives (y, opacity, scale)
        #[arg(long, default_value = "y")]
        channel: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the reveal timeline of a staggered group
    Reveal {
        /// Variant every child uses
        #[arg(long, value_enum, default_value_t = commands::reveal::PresetName::FadeInUp)]
        preset: commands::reveal::PresetName,
        /// Number of children in the group
        #[arg(long, default_value_t = 3)]
        children: usize,
        /// Seconds between samples
        #[arg(long, default_value_t = 0.1)]
        step: f64,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the static page content
    Content {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration
    Config {
        /// Write the defaults to the config file
        #[arg(long)]
        write: bool,
    },
    /// Open a link from the page
    Open {
        /// web-app, or a section to start the TUI at
        #[arg(short = 't', long, default_value = "web-app")]
        target: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging, RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Some(Commands::Run { section }) => {
            let section = section.as_deref().map(commands::parse_section).transpose()?;
            commands::run::run(config, section)
        }
        None => commands::run::run(config, None),
        Some(Commands::Parallax {
            scroll,
            start,
            end,
            map,
            channel,
            json,
        }) => commands::parallax::run(scroll, start, end, &map, &channel, json),
        Some(Commands::Reveal {
            preset,
            children,
            step,
            json,
        }) => commands::reveal::run(&config, preset, children, step, json),
        Some(Commands::Content { json }) => commands::content::run(json),
        Some(Commands::Config { write }) => commands::config::run(&config, write),
        Some(Commands::Open { target }) => commands::open::run(config, &target),
    }
}
