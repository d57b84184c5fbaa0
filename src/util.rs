//! Small helpers that are not specific to the emulator itself.

pub mod bit_splitter;
