//! The state of the virtual machine, as described at
//! <https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description>.

use crate::emulator::error::Error;
use crate::emulator::framebuffer::Framebuffer;

pub const MEM_SIZE: usize = 4096;
pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;
pub const PC_START: u16 = 0x200;
pub const MAX_PROGRAM_SIZE: usize = MEM_SIZE - PC_START as usize;

/// Memory, registers, stack, timers and display of one running program.
///
/// Only the dispatcher and the timer tick mutate this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    pub(crate) memory: [u8; MEM_SIZE],
    pub(crate) registers: [u8; NUM_REGISTERS],
    pub(crate) delay_timer: u8,
    pub(crate) sound_timer: u8,
    pub(crate) i: u16,
    pub(crate) program_counter: u16,
    pub(crate) stack_pointer: usize,
    pub(crate) stack: [u16; STACK_SIZE],
    pub(crate) screen: Framebuffer,
    pub(crate) redraw: bool,
    pub(crate) opcode: u16,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    pub fn new() -> Machine {
        Machine {
            memory: [0; MEM_SIZE],
            registers: [0; NUM_REGISTERS],
            delay_timer: 0,
            sound_timer: 0,
            i: 0,
            program_counter: PC_START,
            stack_pointer: 0,
            stack: [0; STACK_SIZE],
            screen: Framebuffer::new(),
            redraw: false,
            opcode: 0,
        }
    }

    /// Clear memory, then copy a program into it at 0x200.
    ///
    /// Nothing is touched if the program does not fit.
    pub fn load(&mut self, program: &[u8]) -> Result<(), Error> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Error::ProgramTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        self.memory = [0; MEM_SIZE];
        let start = PC_START as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    /// Read the two bytes at the program counter and remember them as the current opcode.
    pub fn fetch(&mut self) -> Result<(u8, u8), Error> {
        let pc = self.program_counter as usize;
        if pc + 1 >= MEM_SIZE {
            return Err(Error::MemoryOutOfBounds { address: pc + 1 });
        }
        let (left, right) = (self.memory[pc], self.memory[pc + 1]);
        self.opcode = (left as u16) << 8 | right as u16;
        Ok((left, right))
    }

    /// Count both timers down by one, stopping at zero.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    /// Borrow `len` bytes starting at `address`.
    pub(crate) fn read(&self, address: u16, len: usize) -> Result<&[u8], Error> {
        let start = address as usize;
        let end = start + len;
        if end > MEM_SIZE {
            return Err(Error::MemoryOutOfBounds { address: end - 1 });
        }
        Ok(&self.memory[start..end])
    }

    pub(crate) fn push(&mut self, address: u16) -> Result<(), Error> {
        if self.stack_pointer >= STACK_SIZE {
            return Err(Error::StackOverflow {
                address: self.program_counter,
            });
        }
        self.stack[self.stack_pointer] = address;
        self.stack_pointer += 1;
        Ok(())
    }

    /// Pop the latest return address, zeroing its slot.
    pub(crate) fn pop(&mut self) -> Result<u16, Error> {
        if self.stack_pointer == 0 {
            return Err(Error::StackUnderflow {
                address: self.program_counter,
            });
        }
        self.stack_pointer -= 1;
        let address = self.stack[self.stack_pointer];
        self.stack[self.stack_pointer] = 0;
        Ok(address)
    }

    pub fn memory(&self) -> &[u8; MEM_SIZE] {
        &self.memory
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }

    pub fn register(&self, x: u8) -> u8 {
        self.registers[x as usize & 0xF]
    }

    pub fn set_register(&mut self, x: u8, value: u8) {
        self.registers[x as usize & 0xF] = value;
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn stack(&self) -> &[u16; STACK_SIZE] {
        &self.stack
    }

    pub fn stack_pointer(&self) -> usize {
        self.stack_pointer
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn screen(&self) -> &Framebuffer {
        &self.screen
    }

    pub fn redraw_requested(&self) -> bool {
        self.redraw
    }

    /// Take the pending redraw, if any, clearing the flag.
    pub fn take_redraw(&mut self) -> Option<Framebuffer> {
        if self.redraw {
            self.redraw = false;
            Some(self.screen)
        } else {
            None
        }
    }

    pub fn opcode(&self) -> u16 {
        self.opcode
    }
}
