//! Blightdeep - Headless runner
//!
//! Reads a command script from a file or stdin, drives the engine and
//! prints snapshots as JSON on stdout.

use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};

use anyhow::{bail, Context, Result};

use blightdeep::game::{parse_script_line, Game, ScriptLine};
use blightdeep::EngineConfig;

const USAGE: &str = "usage: blightdeep [--seed N] [--config FILE] [SCRIPT]";

/// Parsed command-line arguments
#[derive(Debug, Default)]
struct Args {
    seed: Option<u64>,
    config: Option<String>,
    script: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().context("--seed needs a value")?;
                parsed.seed = Some(value.parse().with_context(|| format!("bad seed '{}'", value))?);
            }
            "--config" => {
                parsed.config = Some(args.next().context("--config needs a path")?);
            }
            "-h" | "--help" => bail!(USAGE),
            flag if flag.starts_with("--") => bail!("unknown flag '{}'\n{}", flag, USAGE),
            _ if parsed.script.is_none() => parsed.script = Some(arg),
            _ => bail!(USAGE),
        }
    }
    Ok(parsed)
}

fn init_logging() {
    // Logs go to a file so stdout carries only snapshots
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    );
    match OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("blightdeep.log")
    {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.target(env_logger::Target::Stderr);
        }
    }
    builder.init();
}

fn read_script(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read script '{}'", path)),
        None => {
            let mut script = String::new();
            io::stdin()
                .read_to_string(&mut script)
                .context("failed to read script from stdin")?;
            Ok(script)
        }
    }
}

fn print_snapshot(game: &Game, out: &mut impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(&game.snapshot()).context("failed to encode snapshot")?;
    writeln!(out, "{}", json).context("failed to write snapshot")?;
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    log::info!("Starting Blightdeep v{}", env!("CARGO_PKG_VERSION"));

    let args = parse_args(std::env::args().skip(1))?;

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config '{}'", path))?,
        None => EngineConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let script = read_script(args.script.as_deref())?;
    let mut game = Game::new(config);
    game.start_run();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (number, line) in script.lines().enumerate() {
        let parsed = parse_script_line(line)
            .with_context(|| format!("line {}: cannot parse '{}'", number + 1, line.trim()))?;
        match parsed {
            Some(ScriptLine::Command(command)) => {
                let outcome = game.apply(command);
                log::trace!("{:?} -> {:?}", command, outcome);
            }
            Some(ScriptLine::Snapshot) => print_snapshot(&game, &mut out)?,
            None => {}
        }
    }

    print_snapshot(&game, &mut out)?;
    log::info!("Blightdeep finished at turn {} on level {}", game.turn(), game.level());
    Ok(())
}
