//! A native window, drawn with SDL2 when built with `--features sdl2`.

use crate::emulator::framebuffer::{Framebuffer, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Each pixel becomes a square this many window pixels wide.
pub const SCALE: u32 = 8;

/// Top left corners of the squares to fill for every pixel that is on.
pub fn squares(frame: &Framebuffer, scale: u32) -> Vec<(i32, i32)> {
    let mut squares = Vec::new();
    for (y, row) in frame.pixels().iter().enumerate() {
        for (x, _) in row.iter().enumerate().filter(|&(_, &on)| on) {
            squares.push(((x as u32 * scale) as i32, (y as u32 * scale) as i32));
        }
    }
    squares
}

/// Size of the window for a given scale.
pub fn window_size(scale: u32) -> (u32, u32) {
    (SCREEN_WIDTH as u32 * scale, SCREEN_HEIGHT as u32 * scale)
}

#[cfg(feature = "sdl2")]
pub use self::sdl::{open, SdlInput, SdlOutput};

#[cfg(feature = "sdl2")]
mod sdl {
    use sdl2::event::Event;
    use sdl2::keyboard::Keycode;
    use sdl2::pixels::Color;
    use sdl2::rect::Rect;
    use sdl2::render::WindowCanvas;
    use sdl2::EventPump;

    use super::{squares, window_size};
    use crate::emulator::framebuffer::Framebuffer;
    use crate::emulator::input::{EmulatorInput, KeyState};
    use crate::emulator::output::EmulatorOutput;
    use crate::frontend::FrontendError;

    /// Open a window and its event pump.
    pub fn open(scale: u32) -> Result<(SdlInput, SdlOutput), FrontendError> {
        let context = sdl2::init().map_err(FrontendError::Window)?;
        let video = context.video().map_err(FrontendError::Window)?;
        let (width, height) = window_size(scale);
        let window = video
            .window("Chip8", width, height)
            .position_centered()
            .build()
            .map_err(|error| FrontendError::Window(error.to_string()))?;
        let canvas = window
            .into_canvas()
            .build()
            .map_err(|error| FrontendError::Window(error.to_string()))?;
        let events = context.event_pump().map_err(FrontendError::Window)?;

        let input = SdlInput {
            _context: context,
            events,
            state: KeyState::default(),
        };
        let output = SdlOutput { canvas, scale };
        Ok((input, output))
    }

    /// Keys from the SDL event pump, held until released.
    pub struct SdlInput {
        _context: sdl2::Sdl,
        events: EventPump,
        state: KeyState,
    }

    impl EmulatorInput for SdlInput {
        fn poll(&mut self) -> KeyState {
            for event in self.events.poll_iter() {
                match event {
                    Event::Quit { .. }
                    | Event::KeyDown {
                        keycode: Some(Keycode::Escape),
                        ..
                    } => self.state.exit = true,
                    Event::KeyDown {
                        keycode: Some(key), ..
                    } => {
                        if let Some(k) = keymap(key) {
                            self.state.keys[k as usize] = true;
                        }
                    }
                    Event::KeyUp {
                        keycode: Some(key), ..
                    } => {
                        if let Some(k) = keymap(key) {
                            self.state.keys[k as usize] = false;
                        }
                    }
                    _ => {}
                }
            }
            self.state
        }
    }

    /// Fills a white square for every pixel that is on.
    pub struct SdlOutput {
        canvas: WindowCanvas,
        scale: u32,
    }

    impl EmulatorOutput for SdlOutput {
        fn init(&mut self) {
            self.canvas.set_draw_color(Color::RGB(0, 0, 0));
            self.canvas.clear();
            self.canvas.present();
        }

        fn render(&mut self, frame: Framebuffer) {
            self.canvas.set_draw_color(Color::RGB(0, 0, 0));
            self.canvas.clear();
            self.canvas.set_draw_color(Color::RGB(255, 255, 255));
            for (x, y) in squares(&frame, self.scale) {
                let square = Rect::new(x, y, self.scale, self.scale);
                if let Err(error) = self.canvas.fill_rect(square) {
                    log::warn!("Dropped a frame: {}", error);
                    return;
                }
            }
            self.canvas.present();
        }
    }

    /// The hex keypad laid over the left four columns of the keyboard.
    /// ```text
    /// |1|2|3|C|      |1|2|3|4|
    /// |4|5|6|D|  ->  |Q|W|E|R|
    /// |7|8|9|E|  ->  |A|S|D|F|
    /// |A|0|B|F|      |Z|X|C|V|
    /// ```
    fn keymap(key: Keycode) -> Option<u8> {
        match key {
            Keycode::X => Some(0x0),
            Keycode::Num1 => Some(0x1),
            Keycode::Num2 => Some(0x2),
            Keycode::Num3 => Some(0x3),
            Keycode::Q => Some(0x4),
            Keycode::W => Some(0x5),
            Keycode::E => Some(0x6),
            Keycode::A => Some(0x7),
            Keycode::S => Some(0x8),
            Keycode::D => Some(0x9),
            Keycode::Z => Some(0xA),
            Keycode::C => Some(0xB),
            Keycode::Num4 => Some(0xC),
            Keycode::R => Some(0xD),
            Keycode::F => Some(0xE),
            Keycode::V => Some(0xF),
            _ => None,
        }
    }

}
