use crate::emulator::framebuffer::Framebuffer;

/// Somewhere finished frames can be shown.
pub trait EmulatorOutput {
    fn init(&mut self) {}
    fn render(&mut self, frame: Framebuffer);
    fn shutdown(&mut self) {}
}

/// A headless output device that keeps track of what it was given.
#[derive(Debug, Default)]
pub struct DummyOutput {
    frames: usize,
    last: Option<Framebuffer>,
}

impl DummyOutput {
    pub fn new() -> DummyOutput {
        DummyOutput {
            frames: 0,
            last: None,
        }
    }

    /// How many frames have been rendered.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn last_frame(&self) -> Option<&Framebuffer> {
        self.last.as_ref()
    }
}

impl EmulatorOutput for DummyOutput {
    fn render(&mut self, frame: Framebuffer) {
        self.frames += 1;
        self.last = Some(frame);
    }
}

impl<O: EmulatorOutput + ?Sized> EmulatorOutput for Box<O> {
    fn init(&mut self) {
        (**self).init()
    }
    fn render(&mut self, frame: Framebuffer) {
        (**self).render(frame)
    }
    fn shutdown(&mut self) {
        (**self).shutdown()
    }
}
