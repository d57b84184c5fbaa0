//! Random bytes for the masked random instruction.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Something that can produce bytes in the range `0..=254`.
pub trait RandomSource {
    fn next_byte(&mut self) -> u8;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_byte(&mut self) -> u8 {
        (**self).next_byte()
    }
}

/// Draws from the thread-local generator.
pub struct ThreadRandom(ThreadRng);

impl ThreadRandom {
    pub fn new() -> ThreadRandom {
        ThreadRandom(rand::thread_rng())
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn next_byte(&mut self) -> u8 {
        self.0.gen_range(0u8, 255u8)
    }
}

/// A reproducible generator, picked with `--seed`.
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> SeededRandom {
        SeededRandom(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn next_byte(&mut self) -> u8 {
        self.0.gen_range(0u8, 255u8)
    }
}

/// Replays a fixed sequence of bytes, starting over when it runs out.
pub struct FixedRandom {
    bytes: Vec<u8>,
    position: usize,
}

impl FixedRandom {
    pub fn new(bytes: &[u8]) -> FixedRandom {
        FixedRandom {
            bytes: bytes.to_vec(),
            position: 0,
        }
    }
}

impl RandomSource for FixedRandom {
    fn next_byte(&mut self) -> u8 {
        if self.bytes.is_empty() {
            return 0;
        }
        let byte = self.bytes[self.position % self.bytes.len()];
        self.position += 1;
        byte
    }
}
