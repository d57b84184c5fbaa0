//! The monochrome 64x32 display, stored as one `u64` per row.
//!
//! Bit 63 of a row is the leftmost column and bit 0 the rightmost.

use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

/// Column at which an unshifted sprite byte lands in the leftmost eight bits.
const SPRITE_ORIGIN: usize = SCREEN_WIDTH - 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Framebuffer {
    rows: [u64; SCREEN_HEIGHT],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    pub fn new() -> Framebuffer {
        Framebuffer {
            rows: [0; SCREEN_HEIGHT],
        }
    }

    pub fn from_rows(rows: [u64; SCREEN_HEIGHT]) -> Framebuffer {
        Framebuffer { rows }
    }

    pub fn rows(&self) -> &[u64; SCREEN_HEIGHT] {
        &self.rows
    }

    pub fn clear(&mut self) {
        self.rows = [0; SCREEN_HEIGHT];
    }

    /// OR a sprite into the buffer with its top left corner at (`x`, `y`).
    ///
    /// Pixels that are already on stay on and nothing is reported back.
    /// Columns past the right edge and rows past the bottom are dropped.
    pub fn blit(&mut self, x: u8, y: u8, sprite: &[u8]) {
        let x = x as usize;
        for (offset, &byte) in sprite.iter().enumerate() {
            let row = y as usize + offset;
            if row >= SCREEN_HEIGHT {
                break;
            }
            self.rows[row] |= place(byte, x);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < SCREEN_WIDTH && y < SCREEN_HEIGHT && (self.rows[y] >> (SCREEN_WIDTH - 1 - x)) & 1 == 1
    }

    /// Expand the packed rows into one flag per pixel, row by row.
    pub fn pixels(&self) -> [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT] {
        let mut pixels = [[false; SCREEN_WIDTH]; SCREEN_HEIGHT];
        for (y, row) in pixels.iter_mut().enumerate() {
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = self.pixel(x, y);
            }
        }
        pixels
    }
}

/// Shift a sprite byte so its leftmost pixel sits at column `x`.
fn place(byte: u8, x: usize) -> u64 {
    let byte = byte as u64;
    if x <= SPRITE_ORIGIN {
        byte << (SPRITE_ORIGIN - x)
    } else if x < SCREEN_WIDTH {
        byte >> (x - SPRITE_ORIGIN)
    } else {
        0
    }
}

impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.pixels().iter() {
            for &on in row.iter() {
                write!(f, "{}", if on { "#" } else { " " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn full_byte_at_origin_fills_leftmost_eight_bits() {
        let mut fb = Framebuffer::new();
        fb.blit(0, 0, &[0xFF]);
        assert_eq!(0xFF00_0000_0000_0000, fb.rows()[0]);
    }

    #[test]
    fn drawing_twice_keeps_pixels_on() {
        let mut fb = Framebuffer::new();
        fb.blit(0, 0, &[0xFF]);
        fb.blit(0, 0, &[0xFF]);
        assert_eq!(0xFF00_0000_0000_0000, fb.rows()[0]);
    }

    #[test]
    fn overlapping_sprites_are_merged() {
        let mut fb = Framebuffer::new();
        fb.blit(0, 3, &[0b1010_0000]);
        fb.blit(0, 3, &[0b0101_0000]);
        assert_eq!(0xF000_0000_0000_0000, fb.rows()[3]);
    }

    #[test_case(56, 0x0000_0000_0000_00FF ; "rightmost full fit")]
    #[test_case(60, 0x0000_0000_0000_000F ; "half clipped")]
    #[test_case(63, 0x0000_0000_0000_0001 ; "one column left")]
    #[test_case(64, 0 ; "fully off screen")]
    #[test_case(255, 0 ; "far off screen")]
    fn columns_past_the_right_edge_are_clipped(x: u8, expected: u64) {
        let mut fb = Framebuffer::new();
        fb.blit(x, 0, &[0xFF]);
        assert_eq!(expected, fb.rows()[0]);
    }

    #[test]
    fn rows_past_the_bottom_are_clipped() {
        let mut fb = Framebuffer::new();
        fb.blit(0, 30, &[0x80, 0x80, 0x80, 0x80]);
        assert!(fb.pixel(0, 30));
        assert!(fb.pixel(0, 31));
        assert_eq!(2, fb.rows().iter().filter(|row| **row != 0).count());
    }

    #[test]
    fn multi_row_sprite_lands_on_consecutive_rows() {
        let mut fb = Framebuffer::new();
        fb.blit(8, 1, &[0xF0, 0x90, 0xF0]);
        assert_eq!(0x00F0_0000_0000_0000, fb.rows()[1]);
        assert_eq!(0x0090_0000_0000_0000, fb.rows()[2]);
        assert_eq!(0x00F0_0000_0000_0000, fb.rows()[3]);
    }

    #[test]
    fn clear_turns_everything_off() {
        let mut fb = Framebuffer::from_rows([u64::MAX; SCREEN_HEIGHT]);
        fb.clear();
        assert_eq!(Framebuffer::new(), fb);
    }

    #[test]
    fn pixels_are_read_left_to_right() {
        let fb = Framebuffer::from_rows({
            let mut rows = [0; SCREEN_HEIGHT];
            rows[5] = 1 << 63 | 1;
            rows
        });
        let pixels = fb.pixels();
        assert!(pixels[5][0]);
        assert!(pixels[5][63]);
        assert!(!pixels[5][1]);
        assert!(!fb.pixel(64, 5));
    }

    #[test]
    fn display_draws_hashes() {
        let mut fb = Framebuffer::new();
        fb.blit(0, 0, &[0xC0]);
        let text = fb.to_string();
        assert!(text.lines().next().unwrap().starts_with("## "));
        assert_eq!(SCREEN_HEIGHT, text.lines().count());
    }
}
