use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use log::warn;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    ForceQuit, // Ctrl+C
    Escape,
    Submit,
    InputChar(char),
    Paste(String),
    Backspace,
    CursorUp,
    CursorDown,
    FocusNext, // Tab
    FocusPrev, // Shift+Tab
    /// Any other Ctrl+letter chord, lowercased.
    Ctrl(char),
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    let ready = match event::poll(timeout) {
        Ok(ready) => ready,
        Err(e) => {
            warn!("Event poll failed: {}", e);
            return None;
        }
    };
    if !ready {
        return None;
    }
    match event::read() {
        Ok(event) => map_event(event),
        Err(e) => {
            warn!("Event read failed: {}", e);
            None
        }
    }
}

fn map_event(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            // Keyboard enhancement reports releases too
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (KeyModifiers::CONTROL, KeyCode::Char(c)) => {
                    Some(TuiEvent::Ctrl(c.to_ascii_lowercase()))
                }
                (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
                (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
                (_, KeyCode::Tab) => Some(TuiEvent::FocusNext),
                (_, KeyCode::BackTab) => Some(TuiEvent::FocusPrev),
                _ => None,
            }
        }
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(..) => Some(TuiEvent::Resize),
        _ => None,
    }
}
