/*!

An interpreter for a subset of CHIP-8, as specified at https://en.wikipedia.org/wiki/CHIP-8.

Supported are jumps and calls, the register/constant skips, setting and adding
constants, the index register, masked random numbers, sprite drawing and the
two timers. Anything else is reported as an unknown opcode and ends the run.
Sprites are OR'ed onto the screen, there is no XOR and no collision flag.

# Running

`cargo run --release -- <program>` draws in the terminal, `--ui headless` runs
without any output. Press Esc or `q` to quit.

# Library

The main way of running a program is to load it as bytes and step through it.

```rust
use chip8_subset::emulator::{Emulator, RunState};

let mut emulator = Emulator::new();

// Load a program at address 0x200.
let clear_display = [0x00, 0xE0];
emulator.load(&clear_display).unwrap();
assert_eq!(emulator.step(), RunState::Running); // Clears the display
assert_eq!(emulator.step(), RunState::Halted); // Ran into zeroed memory
```

Alternatively, you can execute instructions manually.

```rust
use chip8_subset::emulator::Emulator;
use chip8_subset::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new();
emulator.execute_single(Instruction::Goto(Addr(0x250))).unwrap();
emulator.execute_single(Instruction::SetRegToConst(Reg(0xA), Const(35))).unwrap();
assert_eq!(emulator.machine().register(0xA), 35);
```

## Paced runs with input and output

A `Runner` ticks an emulator at a fixed rate, hands redrawn frames to an
`EmulatorOutput` and polls an `EmulatorInput` for a request to quit.

```rust
use chip8_subset::emulator::{Emulator, Outcome, RunConfig, Runner};
use chip8_subset::emulator::input::DummyInput;
use chip8_subset::emulator::output::DummyOutput;

let mut emulator = Emulator::new();
emulator.load(&[0x00, 0xE0]).unwrap();

let mut runner = Runner::new(emulator, DummyInput, DummyOutput::new(), RunConfig::default());
assert_eq!(runner.run(), Ok(Outcome::Halted));
assert_eq!(runner.output().frames(), 1);
```
*/

pub mod emulator;
pub mod frontend;
pub mod util;
