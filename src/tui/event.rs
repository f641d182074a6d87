use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    // App actions (turned into router actions)
    PushPage(usize), // 1-9, index into the page catalogue
    SetAll,
    RemoveTwo,
    Restore,

    // Host navigation (written straight to the opaque path)
    HostBack,
    HostPush,

    // TUI-local events
    ToggleDuplicates,
    Quit,
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`
pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    let event = match event::read()? {
        Event::Key(key_event) => {
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            map_key(key_event)
        }
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    };
    Ok(event)
}

/// Translate a key press. Releases and repeats are ignored.
pub fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
        (_, KeyCode::Char(c @ '1'..='9')) => Some(TuiEvent::PushPage(c as usize - '1' as usize)),
        (_, KeyCode::Char('s')) => Some(TuiEvent::SetAll),
        (_, KeyCode::Char('x')) => Some(TuiEvent::RemoveTwo),
        (_, KeyCode::Char('r')) => Some(TuiEvent::Restore),
        (_, KeyCode::Char('h')) => Some(TuiEvent::HostPush),
        (_, KeyCode::Char('d')) => Some(TuiEvent::ToggleDuplicates),
        (_, KeyCode::Backspace) | (_, KeyCode::Left) => Some(TuiEvent::HostBack),
        (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => Some(TuiEvent::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_digits_map_to_catalogue_index() {
        assert_eq!(map_key(press(KeyCode::Char('1'))), Some(TuiEvent::PushPage(0)));
        assert_eq!(map_key(press(KeyCode::Char('9'))), Some(TuiEvent::PushPage(8)));
        assert_eq!(map_key(press(KeyCode::Char('0'))), None);
    }

    #[test]
    fn test_backspace_is_host_back() {
        assert_eq!(map_key(press(KeyCode::Backspace)), Some(TuiEvent::HostBack));
        assert_eq!(map_key(press(KeyCode::Left)), Some(TuiEvent::HostBack));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(TuiEvent::Quit));
    }

    #[test]
    fn test_release_is_ignored() {
        let key = KeyEvent {
            code: KeyCode::Char('h'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(key), None);
    }
}
