use crate::sim::Command;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::fmt;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// A decoded key press. `Display` gives a stable name per physical key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Key {
    Char(char),
    Ctrl(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Other,
}

impl Key {
    pub(crate) fn decode(code: KeyCode, mods: KeyModifiers) -> Self {
        match code {
            KeyCode::Char(ch) if mods.contains(KeyModifiers::CONTROL) => {
                Key::Ctrl(ch.to_ascii_lowercase())
            }
            KeyCode::Char(ch) => Key::Char(ch),
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Esc,
            _ => Key::Other,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(ch) => write!(f, "Rune[{ch}]"),
            Key::Ctrl(ch) => write!(f, "Ctrl+{}", ch.to_ascii_uppercase()),
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::Left => f.write_str("Left"),
            Key::Right => f.write_str("Right"),
            Key::Enter => f.write_str("Enter"),
            Key::Esc => f.write_str("Esc"),
            Key::Other => f.write_str("Other"),
        }
    }
}

/// Blocking source of key presses.
pub(crate) trait KeySource: Send + 'static {
    fn next_key(&mut self) -> anyhow::Result<Key>;
}

/// Reads the terminal's event stream, skipping everything that is not a key press.
pub(crate) struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn next_key(&mut self) -> anyhow::Result<Key> {
        loop {
            if let Event::Key(k) = event::read()? {
                if k.kind == KeyEventKind::Press {
                    return Ok(Key::decode(k.code, k.modifiers));
                }
            }
        }
    }
}

/// Spawns the listener thread and returns the loop's end of the hand-off channel.
///
/// The channel has no buffer: the listener waits on `send` until the loop
/// takes the key, so presses reach the loop in the order they were read.
/// The thread is never joined; it ends with the process, or earlier if the
/// source fails or the receiver is dropped.
pub(crate) fn start<S: KeySource>(mut source: S) -> Receiver<Key> {
    let (tx, rx) = mpsc::sync_channel::<Key>(0);
    thread::spawn(move || loop {
        let key = match source.next_key() {
            Ok(key) => key,
            Err(e) => {
                log::warn!("key listener stopped: {e:#}");
                break;
            }
        };
        log::trace!("key {key}");
        if tx.send(key).is_err() {
            log::debug!("key listener: game loop gone");
            break;
        }
    });
    rx
}

/// Takes at most one pending key without waiting.
pub(crate) fn poll(rx: &Receiver<Key>) -> Option<Key> {
    match rx.try_recv() {
        Ok(key) => Some(key),
        Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
    }
}

pub(crate) fn map_key(key: Key) -> Option<Command> {
    match key {
        Key::Char('w') | Key::Char('W') => Some(Command::LeftUp),
        Key::Char('s') | Key::Char('S') => Some(Command::LeftDown),
        Key::Up => Some(Command::RightUp),
        Key::Down => Some(Command::RightDown),
        Key::Char('q') | Key::Char('Q') | Key::Esc | Key::Ctrl('c') => Some(Command::Quit),
        _ => None,
    }
}
