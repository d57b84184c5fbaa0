use std::error::Error;
use std::num::NonZeroU32;
use std::path::PathBuf;

use structopt::StructOpt;

use chip8_subset::emulator::random::{RandomSource, SeededRandom, ThreadRandom};
use chip8_subset::emulator::{Emulator, Outcome, RunConfig, Runner};
use chip8_subset::frontend::Frontend;

/// Run a CHIP-8 program.
#[derive(StructOpt, Debug)]
#[structopt(name = "chip8-subset")]
struct Opt {
    /// Log the raw bytes of every fetched instruction
    #[structopt(short, long)]
    debug: bool,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,

    /// Where to draw: terminal, window (needs the sdl2 feature) or headless
    #[structopt(long, default_value = "terminal")]
    ui: Frontend,

    /// Instructions executed per second
    #[structopt(long, default_value = "60")]
    tick_rate: NonZeroU32,

    /// Stop after this many instructions
    #[structopt(long)]
    max_ticks: Option<u64>,

    /// Seed for the random number instruction, makes runs repeatable
    #[structopt(long)]
    seed: Option<u64>,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

impl Opt {
    fn log_level(&self) -> log::LevelFilter {
        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        // Fetched bytes are logged at debug level
        if self.debug {
            level.max(log::LevelFilter::Debug)
        } else {
            level
        }
    }

    fn random(&self) -> Box<dyn RandomSource> {
        match self.seed {
            Some(seed) => {
                log::info!("Using random seed {}", seed);
                Box::new(SeededRandom::new(seed))
            }
            None => Box::new(ThreadRandom::new()),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Get configuration and read input file
    let opt = Opt::from_args();

    env_logger::Builder::from_default_env()
        .filter_level(opt.log_level())
        .init();

    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    // Load instructions into emulator memory
    let mut emulator = Emulator::with_random(opt.random());
    emulator.load(&program)?;

    let config = RunConfig {
        tick_rate: opt.tick_rate,
        debug: opt.debug,
        max_ticks: opt.max_ticks,
    };
    let (input, output) = opt.ui.devices()?;
    let mut runner = Runner::new(emulator, input, output, config);

    // Start execution
    let outcome = runner.run();
    drop(runner);

    match outcome? {
        Outcome::Halted => log::info!("Program halted"),
        Outcome::Stopped => log::info!("Stopped on request"),
        Outcome::TickLimit => log::info!("Reached the tick limit"),
    }
    Ok(())
}
