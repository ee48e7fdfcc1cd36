use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use quest_core::content::{Href, Section};

use crate::app::App;

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    HalfPageDown,
    HalfPageUp,
    PageDown,
    PageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    JumpToSection(Section),
    NextLink,
    PrevLink,
    OpenLink,
    Replay,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => Action::Quit,

        // Line scrolling
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, KeyModifiers::NONE) => {
            Action::ScrollDown
        }
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, KeyModifiers::NONE) => {
            Action::ScrollUp
        }

        // Page scrolling
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::HalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::HalfPageUp,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => Action::PageDown,
        (KeyCode::Char('b'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => Action::PageUp,
        (KeyCode::Char(' '), KeyModifiers::NONE) => Action::PageDown,

        // Jump to top/bottom
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            // gg requires double press
            if app.pending_key == Some('g') {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Char('G'), _) => Action::JumpToBottom,
        (KeyCode::Home, _) => Action::JumpToTop,
        (KeyCode::End, _) => Action::JumpToBottom,

        // Navbar anchors
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => nav_anchor(app, c),

        // Links
        (KeyCode::Tab, KeyModifiers::NONE) => Action::NextLink,
        (KeyCode::BackTab, _) => Action::PrevLink,
        (KeyCode::Enter, KeyModifiers::NONE) | (KeyCode::Char('o'), KeyModifiers::NONE) => {
            Action::OpenLink
        }

        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Replay,

        _ => Action::None,
    }
}

fn nav_anchor(app: &App, digit: char) -> Action {
    let index = digit.to_digit(10).unwrap_or(0) as usize;
    match index.checked_sub(1).and_then(|i| app.content.nav.get(i)) {
        Some(link) => match link.href {
            Href::Anchor(section) => Action::JumpToSection(section),
            _ => Action::None,
        },
        None => Action::None,
    }
}
