//! The interpreter: machine state, decoder, dispatcher and tick loop.

pub mod emulator;
pub mod error;
pub mod framebuffer;
pub mod input;
pub mod instruction;
pub mod machine;
pub mod output;
pub mod random;
pub mod runner;

pub use self::emulator::{Emulator, RunState};
pub use self::error::Error;
pub use self::framebuffer::Framebuffer;
pub use self::runner::{Outcome, RunConfig, Runner, StopHandle};
