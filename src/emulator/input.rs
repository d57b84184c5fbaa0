/// The state of the 16-key keypad, plus whether the user asked to quit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub keys: [bool; 16],
    pub exit: bool,
}

impl KeyState {
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }
}

/// Represents an input device that can report which keys are held down.
pub trait EmulatorInput {
    fn poll(&mut self) -> KeyState;
}

/// An input device that never provides any input
pub struct DummyInput;

impl EmulatorInput for DummyInput {
    fn poll(&mut self) -> KeyState {
        KeyState::default()
    }
}

impl<I: EmulatorInput + ?Sized> EmulatorInput for Box<I> {
    fn poll(&mut self) -> KeyState {
        (**self).poll()
    }
}
