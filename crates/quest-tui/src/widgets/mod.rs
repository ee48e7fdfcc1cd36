pub mod card;
mod navbar;
pub mod page;
mod status_bar;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub use navbar::NavbarWidget;
pub use page::PageWidget;
pub use status_bar::StatusBarWidget;

use crate::app::{App, STATUS_ROWS};

/// Draw one frame: page, fixed navbar on top, status bar below.
pub fn draw(frame: &mut Frame, app: &App) {
    let size = frame.area();
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(STATUS_ROWS)])
        .split(size);

    let page = PageWidget {
        layout: &app.layout,
        styles: &app.styles,
        theme: &app.theme,
        scale: app.scale,
        focused_link: app.focused_link,
    }
    .render_page();

    let buf = frame.buffer_mut();
    page::blit(&page, app.scroll.current_scroll(), buf, main_layout[0]);
    NavbarWidget::render(buf, main_layout[0], app);
    StatusBarWidget::render(buf, main_layout[1], app);
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use super::*;
    use crate::input::Action;
    use quest_core::content::Section;
    use quest_core::AppConfig;

    fn screen_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "));
            }
            text.push('\n');
        }
        text
    }

    fn render(app: &App) -> String {
        let backend = TestBackend::new(app.viewport_width, app.viewport_height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        screen_text(terminal.backend().buffer())
    }

    fn reduced() -> AppConfig {
        let mut config = AppConfig::default();
        config.motion.enabled = false;
        config.ui.scroll.smooth_enabled = false;
        config
    }

    #[test]
    fn test_reduced_motion_renders_hero() {
        let app = App::new(reduced(), 100, 41, Instant::now()).unwrap();
        let text = render(&app);
        assert!(text.contains("Quest"));
        assert!(text.contains("Get Started"));
        assert!(text.contains(app.content.hero.heading));
        assert!(text.contains("STATIC"));
    }

    #[test]
    fn test_hidden_until_revealed() {
        let now = Instant::now();
        let mut config = AppConfig::default();
        config.ui.scroll.smooth_enabled = false;
        let mut app = App::new(config, 100, 41, now).unwrap();

        // jump straight to the features: still hidden on the first frame
        app.handle_action(Action::JumpToSection(Section::Features), now);
        let first_card = app.content.features[0].title;
        assert!(!render(&app).contains(first_card));

        app.tick(now + Duration::from_secs(5));
        assert!(render(&app).contains(first_card));
    }

    #[test]
    fn test_status_message_shown() {
        let mut app = App::new(reduced(), 100, 41, Instant::now()).unwrap();
        app.set_status("Replaying animations");
        assert!(render(&app).contains("Replaying animations"));
    }
}
