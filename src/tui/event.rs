use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use log::{debug, warn};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    // Routed to core actions
    ForceQuit,       // Ctrl+C
    Submit,          // Enter
    Emergency,       // Ctrl+E
    ToggleRecording, // Ctrl+R
    Escape,
    /// F1..F5, zero-based index into `MoodTag::ALL`
    MoodKey(usize),

    // Input box editing
    InputChar(char),
    Paste(String),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,

    // Message list
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,

    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(ev) => translate(ev),
        Err(e) => {
            warn!("Event read failed: {}", e);
            None
        }
    }
}

/// Maps a raw crossterm event onto a `TuiEvent`.
pub fn translate(ev: Event) -> Option<TuiEvent> {
    match ev {
        Event::Key(key_event) => {
            // Keyboard enhancement reports releases too; act on presses only
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code, key_event.modifiers
            );
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (KeyModifiers::CONTROL, KeyCode::Char('e')) => Some(TuiEvent::Emergency),
                (KeyModifiers::CONTROL, KeyCode::Char('r')) => Some(TuiEvent::ToggleRecording),
                (_, KeyCode::F(n @ 1..=5)) => Some(TuiEvent::MoodKey(usize::from(n - 1))),
                (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
                    Some(TuiEvent::InputChar(c))
                }
                (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Delete) => Some(TuiEvent::Delete),
                (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
                (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
                (_, KeyCode::Home) => Some(TuiEvent::CursorHome),
                (_, KeyCode::End) => Some(TuiEvent::CursorEnd),
                (_, KeyCode::Up) => Some(TuiEvent::ScrollUp),
                (_, KeyCode::Down) => Some(TuiEvent::ScrollDown),
                (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
                (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_control_shortcuts() {
        assert_eq!(
            translate(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(TuiEvent::ForceQuit)
        );
        assert_eq!(
            translate(key(KeyCode::Char('e'), KeyModifiers::CONTROL)),
            Some(TuiEvent::Emergency)
        );
        assert_eq!(
            translate(key(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Some(TuiEvent::ToggleRecording)
        );
    }

    #[test]
    fn test_function_keys_map_to_moods() {
        assert_eq!(translate(key(KeyCode::F(1), KeyModifiers::NONE)), Some(TuiEvent::MoodKey(0)));
        assert_eq!(translate(key(KeyCode::F(5), KeyModifiers::NONE)), Some(TuiEvent::MoodKey(4)));
        assert_eq!(translate(key(KeyCode::F(6), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_plain_and_shifted_chars_are_input() {
        assert_eq!(
            translate(key(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some(TuiEvent::InputChar('a'))
        );
        assert_eq!(
            translate(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(TuiEvent::InputChar('A'))
        );
        assert_eq!(translate(key(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut release = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate(Event::Key(release)), None);
        assert_eq!(translate(key(KeyCode::Enter, KeyModifiers::NONE)), Some(TuiEvent::Submit));
    }

    #[test]
    fn test_paste_and_resize() {
        assert_eq!(
            translate(Event::Paste("hi".to_string())),
            Some(TuiEvent::Paste("hi".to_string()))
        );
        assert_eq!(translate(Event::Resize(80, 24)), Some(TuiEvent::Resize));
    }
}
