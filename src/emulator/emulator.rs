//! Fetch, decode and execute, one instruction at a time.

use crate::emulator::error::Error;
use crate::emulator::instruction::*;
use crate::emulator::machine::Machine;
use crate::emulator::random::{RandomSource, ThreadRandom};

/// Where a program is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// A zero word was fetched.
    Halted,
    /// Execution stopped on an error and will not resume.
    Faulted(Error),
}

pub struct Emulator<R: RandomSource> {
    machine: Machine,
    random: R,
    state: RunState,
    debug: bool,
}

impl Emulator<ThreadRandom> {
    /// Create a new emulator drawing random bytes from the thread-local generator
    pub fn new() -> Emulator<ThreadRandom> {
        Emulator::with_random(ThreadRandom::new())
    }
}

impl Default for Emulator<ThreadRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> Emulator<R> {
    /// Create a new emulator with a specific source of random bytes
    pub fn with_random(random: R) -> Emulator<R> {
        Emulator {
            machine: Machine::new(),
            random,
            state: RunState::Running,
            debug: false,
        }
    }

    /// Log the raw bytes of every fetched instruction.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Copy a program into memory at 0x200.
    pub fn load(&mut self, program: &[u8]) -> Result<(), Error> {
        self.machine.load(program)
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut Machine {
        &mut self.machine
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Fetch the instruction at the program counter and execute it.
    ///
    /// A zero word halts the program. Any error is terminal, later calls
    /// return the same state without touching the machine.
    pub fn step(&mut self) -> RunState {
        if self.state != RunState::Running {
            return self.state;
        }
        self.state = match self.fetch_and_execute() {
            Ok(state) => state,
            Err(error) => {
                log::error!("{}", error);
                RunState::Faulted(error)
            }
        };
        self.state
    }

    fn fetch_and_execute(&mut self) -> Result<RunState, Error> {
        let address = self.machine.program_counter;
        let (left, right) = self.machine.fetch()?;
        let opcode = self.machine.opcode;

        if self.debug {
            log::debug!("{:#05X}: {:#04X} {:#04X}", address, left, right);
        }

        if opcode == 0x0000 {
            log::info!("Halting on zero word at {:#05X}", address);
            return Ok(RunState::Halted);
        }

        let instruction = Instruction::from_two_u8(left, right)
            .ok_or(Error::UnknownOpcode { opcode, address })?;
        log::trace!("{:?}", instruction);

        self.execute_single(instruction)?;
        Ok(RunState::Running)
    }

    /// Execute a single instruction
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<(), Error> {
        let m = &mut self.machine;
        match instruction {
            Instruction::ClearScreen => {
                m.screen.clear();
                m.redraw = true;
                m.program_counter += 2;
            }

            // Return to the call site via the stack.
            Instruction::Return => {
                m.program_counter = m.pop()?;
            }

            Instruction::Goto(Addr(addr)) => {
                m.program_counter = addr;
            }

            // The address of the call itself is what gets stored.
            Instruction::Call(Addr(addr)) => {
                let pc = m.program_counter;
                m.push(pc)?;
                m.program_counter = addr;
            }

            Instruction::IfRegEqConst(Reg(x), Const(n)) => {
                m.program_counter += skip(m.register(x) == n);
            }

            Instruction::IfRegNeqConst(Reg(x), Const(n)) => {
                m.program_counter += skip(m.register(x) != n);
            }

            Instruction::IfRegEqReg(Reg(x), Reg(y)) => {
                m.program_counter += skip(m.register(x) == m.register(y));
            }

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                m.set_register(x, n);
                m.program_counter += 2;
            }

            // Wraps around, the carry flag is left alone.
            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                m.set_register(x, m.register(x).wrapping_add(n));
                m.program_counter += 2;
            }

            Instruction::SetI(Addr(addr)) => {
                m.i = addr & 0x0FFF;
                m.program_counter += 2;
            }

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                m.set_register(x, self.random.next_byte() & n);
                m.program_counter += 2;
            }

            Instruction::Draw(Reg(x), Reg(y), Const(sprite_height)) => {
                let (x_coord, y_coord) = (m.register(x), m.register(y));
                let mut sprite = [0u8; 16];
                let height = sprite_height as usize;
                sprite[..height].copy_from_slice(m.read(m.i, height)?);
                m.screen.blit(x_coord, y_coord, &sprite[..height]);
                m.redraw = true;
                m.program_counter += 2;
            }

            Instruction::SetDelayTimerToReg(Reg(x)) => {
                m.delay_timer = m.register(x);
                m.program_counter += 2;
            }

            Instruction::SetSoundTimerToReg(Reg(x)) => {
                m.sound_timer = m.register(x);
                m.program_counter += 2;
            }
        };
        Ok(())
    }
}

/// How far to move the program counter for a conditional skip.
fn skip(condition: bool) -> u16 {
    if condition {
        4
    } else {
        2
    }
}
