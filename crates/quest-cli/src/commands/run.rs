use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use quest_core::content::Section;
use quest_core::AppConfig;
use quest_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    scroll::ScrollConfigExt,
    widgets,
};

pub fn run(config: AppConfig, start_section: Option<Section>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Quest"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, config, start_section);

    // Restore terminal, even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: AppConfig,
    start_section: Option<Section>,
) -> Result<()> {
    let size = terminal.size()?;
    let event_handler = EventHandler::with_animation_rate(
        config.ui.tick_rate_ms,
        config.ui.scroll.animation_tick_duration(),
    );

    let mut app = App::new(config, size.width, size.height, Instant::now())?;
    if let Some(section) = start_section {
        app.handle_action(Action::JumpToSection(section), Instant::now());
    }

    // Track if we need high frame rate for scrolling or reveals in flight
    let mut needs_fast_update = app.needs_fast_update();

    loop {
        app.tick(Instant::now());
        terminal.draw(|frame| widgets::draw(frame, &app))?;

        // Handle events (use faster tick rate during animations)
        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            let now = Instant::now();
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, &app);
                    debug!(?action, "key");
                    app.handle_action(action, now);
                }
                AppEvent::Scroll(rows) => app.scroll_by(rows),
                AppEvent::Resize(width, height) => app.resize(width, height, now),
                AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
