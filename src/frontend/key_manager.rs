use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::emulator::input::KeyState;

/// Terminals only report presses, so a key counts as held this long after its last press.
const TIMEOUT: Duration = Duration::from_millis(250);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Default)]
struct SharedData {
    pressed: [Option<Instant>; 16],
}

/// A struct for managing keypresses that will automatically
/// start a thread that grabs keypresses.
pub struct KeyManager {
    stop: Arc<AtomicBool>,
    exit: Arc<AtomicBool>,
    shared_data: Arc<Mutex<SharedData>>,
    event_listener: Option<JoinHandle<()>>,
}

impl KeyManager {
    // Start event listener thread
    pub fn new() -> KeyManager {
        let stop = Arc::new(AtomicBool::new(false));
        let exit = Arc::new(AtomicBool::new(false));
        let shared_data = Arc::new(Mutex::new(SharedData::default()));
        let event_listener = event_listener(stop.clone(), exit.clone(), shared_data.clone());
        KeyManager {
            stop,
            exit,
            shared_data,
            event_listener: Some(event_listener),
        }
    }

    /// The keys pressed within the last `TIMEOUT`, and whether quitting was asked for.
    pub fn state(&self) -> KeyState {
        let mut state = KeyState {
            exit: self.exit.load(Ordering::SeqCst),
            ..KeyState::default()
        };
        if let Ok(shared) = self.shared_data.lock() {
            for (held, pressed) in state.keys.iter_mut().zip(shared.pressed.iter()) {
                *held = pressed.map_or(false, |at| at.elapsed() < TIMEOUT);
            }
        }
        state
    }
}

impl Default for KeyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for KeyManager {
    fn drop(&mut self) {
        // Tell the event listener to stop, it notices within one poll interval
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.event_listener.take() {
            let _ = handle.join();
        }
    }
}

/// Starts a thread that listens for key events and records them.
fn event_listener(
    stop: Arc<AtomicBool>,
    exit: Arc<AtomicBool>,
    shared_data: Arc<Mutex<SharedData>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(Ordering::SeqCst) {
            match poll(POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(error) => {
                    log::warn!("Could not poll for key events: {}", error);
                    break;
                }
            }

            let event = match read() {
                Ok(event) => event,
                Err(error) => {
                    log::warn!("Could not read key event: {}", error);
                    break;
                }
            };
            log::trace!("Got event {:?}", event);

            if let Event::Key(key_event) = event {
                if is_exit(&key_event) {
                    exit.store(true, Ordering::SeqCst);
                } else if let Some(key) = key_to_u8(key_event.code) {
                    if let Ok(mut shared) = shared_data.lock() {
                        shared.pressed[key as usize] = Some(Instant::now());
                    }
                }
            }
        }
    })
}

fn is_exit(event: &KeyEvent) -> bool {
    match event.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Map 0-9 and a-f onto the keypad.
fn key_to_u8(key: KeyCode) -> Option<u8> {
    match key {
        KeyCode::Char(c) => c.to_digit(16).map(|c| c as u8),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case('0', Some(0x0) ; "zero")]
    #[test_case('9', Some(0x9) ; "nine")]
    #[test_case('a', Some(0xA) ; "lower a")]
    #[test_case('F', Some(0xF) ; "upper f")]
    #[test_case('g', None ; "past f")]
    fn hex_digits_map_to_keys(c: char, expected: Option<u8>) {
        assert_eq!(expected, key_to_u8(KeyCode::Char(c)));
    }

    #[test]
    fn escape_q_and_ctrl_c_exit() {
        assert!(is_exit(&KeyEvent { code: KeyCode::Esc, modifiers: KeyModifiers::NONE }));
        assert!(is_exit(&KeyEvent { code: KeyCode::Char('q'), modifiers: KeyModifiers::NONE }));
        assert!(is_exit(&KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL }));
        assert!(!is_exit(&KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::NONE }));
    }
}
