use crate::util::bit_splitter::BitSplitter;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the supported subset of the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - NN: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen,                  // 00E0
    Return,                       // 00EE
    Goto(Addr),                   // 1NNN
    Call(Addr),                   // 2NNN
    IfRegEqConst(Reg, Const),     // 3XNN
    IfRegNeqConst(Reg, Const),    // 4XNN
    IfRegEqReg(Reg, Reg),         // 5XY0
    SetRegToConst(Reg, Const),    // 6XNN
    IncRegByConst(Reg, Const),    // 7XNN
    SetI(Addr),                   // ANNN
    SetVxRand(Reg, Const),        // CXNN
    Draw(Reg, Reg, Const),        // DXYN
    SetDelayTimerToReg(Reg),      // FX15
    SetSoundTimerToReg(Reg),      // FX18
}

impl Instruction {
    pub fn from_u16(value: u16) -> Option<Instruction> {
        Instruction::decode(BitSplitter::from_u16(value))
    }

    pub fn from_two_u8(left: u8, right: u8) -> Option<Instruction> {
        Instruction::decode(BitSplitter::new(left, right))
    }

    /// Decode an opcode, returning `None` for anything outside the supported subset.
    pub fn decode(opcode: BitSplitter) -> Option<Instruction> {
        let instruction = match opcode.as_four_u8() {
            // The zero group is told apart by its low nibble alone.
            (0, _, _, 0) => Instruction::ClearScreen,
            (0, _, _, 0xE) => Instruction::Return,
            (1, _, _, _) => Instruction::Goto(Addr(opcode.nnn())),
            (2, _, _, _) => Instruction::Call(Addr(opcode.nnn())),
            (3, x, _, _) => Instruction::IfRegEqConst(Reg(x), Const(opcode.nn())),
            (4, x, _, _) => Instruction::IfRegNeqConst(Reg(x), Const(opcode.nn())),
            // Only the top nibble selects this one, the low nibble is ignored.
            (5, x, y, _) => Instruction::IfRegEqReg(Reg(x), Reg(y)),
            (6, x, _, _) => Instruction::SetRegToConst(Reg(x), Const(opcode.nn())),
            (7, x, _, _) => Instruction::IncRegByConst(Reg(x), Const(opcode.nn())),
            (0xA, _, _, _) => Instruction::SetI(Addr(opcode.nnn())),
            (0xC, x, _, _) => Instruction::SetVxRand(Reg(x), Const(opcode.nn())),
            (0xD, x, y, n) => Instruction::Draw(Reg(x), Reg(y), Const(n)),
            (0xF, x, 1, 5) => Instruction::SetDelayTimerToReg(Reg(x)),
            (0xF, x, 1, 8) => Instruction::SetSoundTimerToReg(Reg(x)),
            _ => return None,
        };
        Some(instruction)
    }
}
