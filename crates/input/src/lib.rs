//! Terminal input module
//!
//! Maps `crossterm` key events into [`blockfall_types::InputKey`] and wraps
//! the non-blocking event queue behind a small polling source. The
//! orchestrator consumes at most one event per tick; an absent event is
//! simply skipped, never awaited.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use blockfall_types::InputKey;

/// Map a key event to the simulation's key alphabet.
///
/// Movement uses WASD with arrow-key aliases; space hard-drops; digit keys
/// reach the Fun-mode power-ups. Any other printable character passes
/// through as [`InputKey::Other`] so mode hooks still see it; non-character
/// keys map to nothing.
pub fn map_key(key: KeyEvent) -> Option<InputKey> {
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(InputKey::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(InputKey::Right),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(InputKey::SoftDrop),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(InputKey::Rotate),
        KeyCode::Char(' ') => Some(InputKey::HardDrop),
        KeyCode::Char(c @ '1'..='4') => Some(InputKey::PowerUp(c as u8 - b'0')),
        KeyCode::Char(c) => Some(InputKey::Other(c)),
        _ => None,
    }
}

/// Check if a key should quit the session.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Non-blocking source of key events for the fixed-tick loop.
#[derive(Debug, Default)]
pub struct InputSource;

impl InputSource {
    pub fn new() -> Self {
        Self
    }

    /// Return the next pending key press without blocking, or `None` when
    /// the queue is empty. Release and repeat events are discarded.
    pub fn poll(&mut self) -> io::Result<Option<KeyEvent>> {
        self.poll_timeout(Duration::ZERO)
    }

    /// Like [`InputSource::poll`] but waits up to `timeout` for an event.
    /// Used to sleep out the remainder of a tick while staying responsive.
    pub fn poll_timeout(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Left)),
            Some(InputKey::Left)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('a'))),
            Some(InputKey::Left)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('D'))),
            Some(InputKey::Right)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Down)),
            Some(InputKey::SoftDrop)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('w'))),
            Some(InputKey::Rotate)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char(' '))),
            Some(InputKey::HardDrop)
        );
    }

    #[test]
    fn test_power_up_keys() {
        for (c, n) in [('1', 1), ('2', 2), ('3', 3), ('4', 4)] {
            assert_eq!(
                map_key(KeyEvent::from(KeyCode::Char(c))),
                Some(InputKey::PowerUp(n))
            );
        }
        // '5' is not a power-up key; it passes through as a plain character.
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('5'))),
            Some(InputKey::Other('5'))
        );
    }

    #[test]
    fn test_other_characters_pass_through() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('x'))),
            Some(InputKey::Other('x'))
        );
        assert_eq!(map_key(KeyEvent::from(KeyCode::F(1))), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
