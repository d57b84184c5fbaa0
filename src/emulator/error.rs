use thiserror::Error;

/// Everything that can stop a program before it halts on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("program is too large ({size} bytes), at most {max} bytes fit after 0x200")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("unknown opcode {opcode:#06X} at address {address:#05X}")]
    UnknownOpcode { opcode: u16, address: u16 },

    #[error("call stack overflow at address {address:#05X}")]
    StackOverflow { address: u16 },

    #[error("return with an empty call stack at address {address:#05X}")]
    StackUnderflow { address: u16 },

    #[error("memory access out of bounds at address {address:#06X}")]
    MemoryOutOfBounds { address: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unknown_opcode_reports_opcode_and_address() {
        let error = Error::UnknownOpcode { opcode: 0x8AB4, address: 0x20A };
        assert_eq!("unknown opcode 0x8AB4 at address 0x20A", error.to_string());
    }
}
