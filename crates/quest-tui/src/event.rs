use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

/// Rows scrolled per mouse wheel notch
pub const WHEEL_ROWS: i32 = 3;

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    animation_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self::with_animation_rate(tick_rate_ms, Duration::from_millis(16))
    }

    /// Handler that polls every `animation_rate` while something on screen
    /// is moving
    pub fn with_animation_rate(tick_rate_ms: u64, animation_rate: Duration) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms.max(1));
        Self {
            tick_rate,
            animation_rate: animation_rate.min(tick_rate),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll with the animation frame budget
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.animation_rate)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            Ok(translate(event::read()?))
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

fn translate(event: Event) -> Option<AppEvent> {
    match event {
        // Only key presses; some terminals also report releases
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Mouse(mouse) => wheel_delta(&mouse).map(AppEvent::Scroll),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

fn wheel_delta(mouse: &MouseEvent) -> Option<i32> {
    match mouse.kind {
        MouseEventKind::ScrollDown => Some(WHEEL_ROWS),
        MouseEventKind::ScrollUp => Some(-WHEEL_ROWS),
        _ => None,
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse wheel, in rows (positive scrolls down)
    Scroll(i32),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_animation_rate() {
        let handler = EventHandler::new(100);
        assert_eq!(handler.animation_rate, Duration::from_millis(16));
        let handler = EventHandler::with_animation_rate(10, Duration::from_millis(33));
        assert_eq!(handler.animation_rate, Duration::from_millis(10));
    }

    #[test]
    fn test_key_release_ignored() {
        let mut key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert!(matches!(translate(Event::Key(key)), Some(AppEvent::Key(_))));
        key.kind = KeyEventKind::Release;
        key.state = KeyEventState::NONE;
        assert!(translate(Event::Key(key)).is_none());
    }

    #[test]
    fn test_wheel_scrolls() {
        assert!(matches!(
            translate(mouse(MouseEventKind::ScrollDown)),
            Some(AppEvent::Scroll(WHEEL_ROWS))
        ));
        assert!(matches!(
            translate(mouse(MouseEventKind::ScrollUp)),
            Some(AppEvent::Scroll(-3))
        ));
        assert!(translate(mouse(MouseEventKind::Moved)).is_none());
    }
}
