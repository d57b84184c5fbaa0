use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{stdout, Write};

use super::key_manager::KeyManager;
use crate::emulator::framebuffer::{Framebuffer, SCREEN_WIDTH};
use crate::emulator::input::{EmulatorInput, KeyState};
use crate::emulator::output::EmulatorOutput;

pub struct CrosstermInput {
    key_manager: KeyManager,
}

impl CrosstermInput {
    pub fn new() -> CrosstermInput {
        CrosstermInput {
            key_manager: KeyManager::new(),
        }
    }
}

impl Default for CrosstermInput {
    fn default() -> Self {
        Self::new()
    }
}

impl EmulatorInput for CrosstermInput {
    fn poll(&mut self) -> KeyState {
        self.key_manager.state()
    }
}

/// Draws frames in the alternate screen, two characters per pixel.
pub struct CrosstermOutput {
    active: bool,
}

impl CrosstermOutput {
    pub fn new() -> CrosstermOutput {
        CrosstermOutput { active: false }
    }
}

impl Default for CrosstermOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CrosstermOutput {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl EmulatorOutput for CrosstermOutput {
    fn init(&mut self) {
        if self.active {
            return;
        }
        let result = terminal::enable_raw_mode().and_then(|_| {
            execute!(
                stdout(),
                EnterAlternateScreen,
                cursor::Hide,
                Clear(ClearType::All)
            )
        });
        match result {
            Ok(()) => self.active = true,
            Err(error) => log::error!("Could not set up the terminal: {}", error),
        }
    }

    fn render(&mut self, frame: Framebuffer) {
        let mut out = stdout();
        let result = frame
            .pixels()
            .iter()
            .enumerate()
            .try_for_each(|(y, row)| {
                queue!(out, cursor::MoveTo(0, y as u16), Print(render_row(row)))
            })
            .and_then(|_| out.flush().map_err(Into::into));
        if let Err(error) = result {
            log::warn!("Dropped a frame: {}", error);
        }
    }

    fn shutdown(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let result = execute!(stdout(), LeaveAlternateScreen, cursor::Show)
            .and_then(|_| terminal::disable_raw_mode());
        if let Err(error) = result {
            log::error!("Could not restore the terminal: {}", error);
        }
    }
}

fn render_row(row: &[bool; SCREEN_WIDTH]) -> String {
    row.iter().map(|&on| if on { "██" } else { "  " }).collect()
}
