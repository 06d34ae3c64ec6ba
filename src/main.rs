//! Lavafall headless runner
//!
//! Parses one plan, drives it with a scripted input at a fixed frame rate and
//! prints the final level snapshot as JSON.
//!
//! Usage: `lavafall [--plan plan.json] [--library library.json]
//! [--tuning tuning.json] [--seed N] [--frames N]`

use std::process::ExitCode;

use lavafall::sim::{ActorLibrary, LevelParser, Status, TickInput, tick};
use lavafall::{SimError, Tuning};

/// Display refresh the runner pretends to run at
const FRAME_DT: f64 = 1.0 / 60.0;
const DEFAULT_FRAMES: u32 = 600;

const DEMO_PLAN: &[&str] = &[
    "                      ",
    "                      ",
    "  x              = x  ",
    "  x         o o    x  ",
    "  x @      xxxxx   x  ",
    "  xxxxx            x  ",
    "      x!!!!!!!!!!!!x  ",
    "      xxxxxxxxxxxxxx  ",
    "                      ",
];

#[derive(Debug, Default)]
struct Args {
    plan: Option<String>,
    library: Option<String>,
    tuning: Option<String>,
    seed: Option<u64>,
    frames: Option<u32>,
}

fn parse_args() -> Result<Args, SimError> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .ok_or_else(|| SimError::InvalidArgument(format!("{flag} needs a value")))
        };
        match flag.as_str() {
            "--plan" => args.plan = Some(value()?),
            "--library" => args.library = Some(value()?),
            "--tuning" => args.tuning = Some(value()?),
            "--seed" => {
                let raw = value()?;
                args.seed = Some(raw.parse().map_err(|_| {
                    SimError::InvalidArgument(format!("--seed expects a number, got {raw}"))
                })?);
            }
            "--frames" => {
                let raw = value()?;
                args.frames = Some(raw.parse().map_err(|_| {
                    SimError::InvalidArgument(format!("--frames expects a number, got {raw}"))
                })?);
            }
            other => {
                return Err(SimError::InvalidArgument(format!("unknown argument {other}")));
            }
        }
    }
    Ok(args)
}

/// Hold right and keep jumping
fn scripted_input(_frame: u32) -> TickInput {
    TickInput {
        right: true,
        jump: true,
        ..Default::default()
    }
}

fn run() -> Result<(), SimError> {
    let args = parse_args()?;

    let plan: Vec<String> = match &args.plan {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => DEMO_PLAN.iter().map(|row| row.to_string()).collect(),
    };
    let library = match &args.library {
        Some(path) => ActorLibrary::from_json(&std::fs::read_to_string(path)?)?,
        None => ActorLibrary::standard(),
    };
    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path),
        None => Tuning::default(),
    };

    let mut parser = LevelParser::new(library);
    if let Some(seed) = args.seed {
        parser = parser.with_seed(seed);
    }
    let mut level = parser.parse(&plan);
    log::info!(
        "Level {}x{} with {} actors",
        level.width(),
        level.height(),
        level.actors().len()
    );

    let frames = args.frames.unwrap_or(DEFAULT_FRAMES);
    let mut last_status: Option<Status> = None;
    for frame in 0..frames {
        tick(&mut level, &scripted_input(frame), FRAME_DT, &tuning)?;
        if level.status() != last_status {
            last_status = level.status();
            log::info!("Frame {frame}: status {last_status:?}");
        }
        if level.is_finished() {
            log::info!("Finished after {} frames", frame + 1);
            break;
        }
    }

    println!("{}", serde_json::to_string_pretty(&level)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Lavafall (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
