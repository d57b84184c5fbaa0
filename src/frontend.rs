//! Ready-made input and output devices, picked once at startup.

pub mod crossterm_io;
pub mod key_manager;
pub mod window;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::emulator::input::{DummyInput, EmulatorInput};
use crate::emulator::output::{DummyOutput, EmulatorOutput};
use crossterm_io::{CrosstermInput, CrosstermOutput};

pub type Devices = (Box<dyn EmulatorInput>, Box<dyn EmulatorOutput>);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrontendError {
    #[error("the {0} frontend was not built in, rebuild with `--features {0}`")]
    Unavailable(&'static str),
    #[error("could not open a window: {0}")]
    Window(String),
}

/// Which devices to run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frontend {
    /// Draw in the terminal and read keys from it.
    Terminal,
    /// Draw in a native window, needs the `sdl2` feature.
    Window,
    /// No drawing and no input.
    Headless,
}

impl Frontend {
    pub const VARIANTS: [&'static str; 3] = ["terminal", "window", "headless"];

    /// Create the input and output devices for this frontend.
    pub fn devices(self) -> Result<Devices, FrontendError> {
        match self {
            Frontend::Terminal => Ok((
                Box::new(CrosstermInput::new()),
                Box::new(CrosstermOutput::new()),
            )),
            Frontend::Window => window_devices(),
            Frontend::Headless => Ok((Box::new(DummyInput), Box::new(DummyOutput::new()))),
        }
    }
}

#[cfg(feature = "sdl2")]
fn window_devices() -> Result<Devices, FrontendError> {
    let (input, output) = window::open(window::SCALE)?;
    Ok((Box::new(input), Box::new(output)))
}

#[cfg(not(feature = "sdl2"))]
fn window_devices() -> Result<Devices, FrontendError> {
    Err(FrontendError::Unavailable("sdl2"))
}

impl Default for Frontend {
    fn default() -> Self {
        Frontend::Terminal
    }
}

impl FromStr for Frontend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "terminal" => Ok(Frontend::Terminal),
            "window" | "sdl" => Ok(Frontend::Window),
            "headless" | "noop" => Ok(Frontend::Headless),
            other => Err(format!(
                "unknown frontend {:?}, expected one of {}",
                other,
                Frontend::VARIANTS.join(", ")
            )),
        }
    }
}

impl fmt::Display for Frontend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frontend::Terminal => write!(f, "terminal"),
            Frontend::Window => write!(f, "window"),
            Frontend::Headless => write!(f, "headless"),
        }
    }
}
