//! The paced tick loop that drives an `Emulator`.

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::emulator::emulator::{Emulator, RunState};
use crate::emulator::error::Error;
use crate::emulator::input::EmulatorInput;
use crate::emulator::output::EmulatorOutput;
use crate::emulator::random::RandomSource;

pub const DEFAULT_TICK_RATE: u32 = 60;

/// How a run should be paced and observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Ticks per second.
    pub tick_rate: NonZeroU32,
    /// Log the raw bytes of every fetched instruction.
    pub debug: bool,
    /// Stop after this many ticks.
    pub max_ticks: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            tick_rate: NonZeroU32::new(DEFAULT_TICK_RATE).unwrap(),
            debug: false,
            max_ticks: None,
        }
    }
}

impl RunConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.get()
    }
}

/// Why a run ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The program ran into a zero word.
    Halted,
    /// A stop was requested, either through a `StopHandle` or by the input.
    Stopped,
    /// The configured tick limit was reached.
    TickLimit,
}

/// Asks a running `Runner` to stop at the next tick.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct Runner<R: RandomSource, I: EmulatorInput, O: EmulatorOutput> {
    emulator: Emulator<R>,
    input: I,
    output: O,
    config: RunConfig,
    stop: StopHandle,
    ticks: u64,
}

impl<R: RandomSource, I: EmulatorInput, O: EmulatorOutput> Runner<R, I, O> {
    pub fn new(mut emulator: Emulator<R>, input: I, output: O, config: RunConfig) -> Self {
        emulator.set_debug(config.debug);
        Runner {
            emulator,
            input,
            output,
            config,
            stop: StopHandle::default(),
            ticks: 0,
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn emulator(&self) -> &Emulator<R> {
        &self.emulator
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Number of ticks that executed an instruction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one tick: execute an instruction, hand over a frame if one is
    /// pending, then count down the timers.
    ///
    /// Returns the state the emulator is in afterwards. Nothing besides the
    /// fetch happens on a tick that halts or faults.
    pub fn tick(&mut self) -> RunState {
        let state = self.emulator.step();
        if state != RunState::Running {
            return state;
        }
        self.ticks += 1;

        let machine = self.emulator.machine_mut();
        if let Some(frame) = machine.take_redraw() {
            self.output.render(frame);
        }
        machine.tick_timers();
        state
    }

    /// Tick until the program halts, faults or is asked to stop.
    pub fn run(&mut self) -> Result<Outcome, Error> {
        self.output.init();
        let outcome = self.run_loop();
        self.output.shutdown();
        match &outcome {
            Ok(outcome) => log::info!("Run ended after {} ticks: {:?}", self.ticks, outcome),
            Err(error) => log::error!("Run failed after {} ticks: {}", self.ticks, error),
        }
        outcome
    }

    fn run_loop(&mut self) -> Result<Outcome, Error> {
        let period = self.config.tick_period();
        let mut deadline = Instant::now();
        loop {
            if self.stop.is_stopped() {
                return Ok(Outcome::Stopped);
            }
            if self.config.max_ticks.map_or(false, |max| self.ticks >= max) {
                return Ok(Outcome::TickLimit);
            }
            if self.input.poll().exit {
                log::info!("Exit requested by input");
                self.stop.stop();
                return Ok(Outcome::Stopped);
            }

            match self.tick() {
                RunState::Running => {}
                RunState::Halted => return Ok(Outcome::Halted),
                RunState::Faulted(error) => return Err(error),
            }

            deadline += period;
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            } else {
                // Running behind, don't try to catch up.
                deadline = now;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emulator::input::{DummyInput, KeyState};
    use crate::emulator::output::DummyOutput;
    use crate::emulator::random::FixedRandom;
    use pretty_assertions::assert_eq;

    fn fast_config() -> RunConfig {
        RunConfig {
            tick_rate: NonZeroU32::new(10_000).unwrap(),
            ..RunConfig::default()
        }
    }

    type TestRunner = Runner<FixedRandom, DummyInput, DummyOutput>;

    fn runner_with(program: &[u8], config: RunConfig) -> TestRunner {
        let mut emulator = Emulator::with_random(FixedRandom::new(&[0]));
        emulator.load(program).unwrap();
        Runner::new(emulator, DummyInput, DummyOutput::new(), config)
    }

    struct ExitAfter(usize);

    impl EmulatorInput for ExitAfter {
        fn poll(&mut self) -> KeyState {
            let exit = self.0 == 0;
            self.0 = self.0.saturating_sub(1);
            KeyState { keys: [false; 16], exit }
        }
    }

    #[test]
    fn default_config_ticks_sixty_times_a_second() {
        let config = RunConfig::default();
        assert_eq!(60, config.tick_rate.get());
        assert_eq!(Duration::from_nanos(16_666_666), config.tick_period());
        assert!(!config.debug);
        assert_eq!(None, config.max_ticks);
    }

    #[test]
    fn runs_until_zero_word() {
        // V0 = 1, clear screen, V0 += 1, then the end of the program
        let mut runner = runner_with(&[0x60, 0x01, 0x00, 0xE0, 0x70, 0x01], fast_config());
        assert_eq!(Ok(Outcome::Halted), runner.run());
        assert_eq!(3, runner.ticks());
        assert_eq!(2, runner.emulator().machine().register(0));
        assert_eq!(1, runner.output().frames());
    }

    #[test]
    fn frames_are_delivered_once_per_redraw() {
        // I = 0x300, draw, draw, V1 = 1
        let program = [0xA3, 0x00, 0xD0, 0x01, 0xD0, 0x01, 0x61, 0x01];
        let mut runner = runner_with(&program, fast_config());
        runner.emulator.machine_mut().memory[0x300] = 0x81;
        assert_eq!(Ok(Outcome::Halted), runner.run());
        assert_eq!(2, runner.output().frames());
        let frame = runner.output().last_frame().unwrap();
        assert_eq!(0x8100_0000_0000_0000, frame.rows()[0]);
        assert!(!runner.emulator().machine().redraw_requested());
    }

    #[test]
    fn timers_count_down_once_per_tick() {
        // V0 = 3, delay = V0, sound = V0, then loop forever
        let program = [0x60, 0x03, 0xF0, 0x15, 0xF0, 0x18, 0x12, 0x06];
        let mut runner = runner_with(&program, fast_config());
        runner.tick();
        runner.tick();
        assert_eq!(2, runner.emulator().machine().delay_timer());
        runner.tick();
        assert_eq!(1, runner.emulator().machine().delay_timer());
        assert_eq!(2, runner.emulator().machine().sound_timer());
        for _ in 0..5 {
            runner.tick();
        }
        assert_eq!(0, runner.emulator().machine().delay_timer());
        assert_eq!(0, runner.emulator().machine().sound_timer());
    }

    #[test]
    fn halting_tick_leaves_timers_alone() {
        let mut runner = runner_with(&[0x60, 0x05, 0xF0, 0x15], fast_config());
        runner.tick();
        runner.tick();
        assert_eq!(4, runner.emulator().machine().delay_timer());
        assert_eq!(RunState::Halted, runner.tick());
        assert_eq!(4, runner.emulator().machine().delay_timer());
    }

    #[test]
    fn debug_logging_does_not_change_execution() {
        // I = 0x20E, V0 = random & 0x3F, V1 = 4, draw, delay = V0, sound = V1, halt
        let program = [
            0xA2, 0x0E, 0xC0, 0x3F, 0x61, 0x04, 0xD0, 0x12, 0xF0, 0x15, 0xF1, 0x18, 0x00, 0x00,
            0xF0, 0x90,
        ];
        let run = |debug| {
            let config = RunConfig { debug, ..fast_config() };
            let mut runner = runner_with(&program, config);
            assert_eq!(Ok(Outcome::Halted), runner.run());
            let machine = runner.emulator().machine().clone();
            (machine, runner.ticks(), runner.output().frames())
        };
        assert_eq!(run(false), run(true));
    }

    #[test]
    fn unknown_opcode_is_reported() {
        let mut runner = runner_with(&[0x60, 0x01, 0xE0, 0x9E], fast_config());
        let expected = Error::UnknownOpcode {
            opcode: 0xE09E,
            address: 0x202,
        };
        assert_eq!(Err(expected), runner.run());
        assert_eq!(1, runner.ticks());
    }

    #[test]
    fn tick_limit_stops_an_endless_loop() {
        let config = RunConfig {
            max_ticks: Some(5),
            ..fast_config()
        };
        let mut runner = runner_with(&[0x12, 0x00], config);
        assert_eq!(Ok(Outcome::TickLimit), runner.run());
        assert_eq!(5, runner.ticks());
    }

    #[test]
    fn stop_handle_stops_before_the_next_tick() {
        let mut runner = runner_with(&[0x12, 0x00], fast_config());
        let handle = runner.stop_handle();
        handle.stop();
        assert_eq!(Ok(Outcome::Stopped), runner.run());
        assert_eq!(0, runner.ticks());
    }

    #[test]
    fn stop_from_another_thread() {
        let mut runner = runner_with(&[0x12, 0x00], fast_config());
        let handle = runner.stop_handle();
        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            handle.stop();
        });
        assert_eq!(Ok(Outcome::Stopped), runner.run());
        stopper.join().unwrap();
        assert!(runner.ticks() > 0);
    }

    #[test]
    fn input_exit_stops_the_run() {
        let mut emulator = Emulator::with_random(FixedRandom::new(&[0]));
        emulator.load(&[0x12, 0x00]).unwrap();
        let mut runner = Runner::new(emulator, ExitAfter(3), DummyOutput::new(), fast_config());
        assert_eq!(Ok(Outcome::Stopped), runner.run());
        assert_eq!(3, runner.ticks());
        assert!(runner.stop_handle().is_stopped());
    }
}
