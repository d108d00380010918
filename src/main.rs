//! sdb - command-line entry point.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use sdb::SdbResult;
use sdb::config::{Config, Overrides};
use sdb::console;
use sdb::monitor::{LineSource, Mode, Script, Shell, Terminal};
use sdb::target::{Machine, Target};

#[macro_use]
extern crate log;

#[derive(Parser, Debug)]
#[command(name = "sdb", version, about = "Simple debugger shell for an emulated CPU")]
struct Cli {
    /// Guest image loaded at the start of memory
    image: Option<PathBuf>,

    /// Run the program to completion without reading commands
    #[arg(short, long)]
    batch: bool,

    /// Config file (default: ./sdb.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace, off
    #[arg(long)]
    log: Option<String>,

    /// Read commands from this file instead of the terminal
    #[arg(long)]
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    match try_main() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("sdb: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the session ended in a good state.
fn try_main() -> SdbResult<bool> {
    let cli = Cli::parse();

    let overrides = Overrides {
        batch: cli.batch.then_some(true),
        log: cli.log.clone(),
        image: cli.image.clone(),
    };
    let config = Config::load(cli.config.as_deref(), &overrides)?;
    console::init_logger(&config.log)?;
    debug!("config: {config:?}");

    let mut machine = Machine::new(config.mem_base, config.mem_size);
    match &config.image {
        Some(path) => machine.load_image_file(path)?,
        None => machine.load_builtin_image()?,
    };

    let mut shell = Shell::new(config.mode(), machine);
    let mut lines = line_source(&config, cli.script.as_ref(), shell.mode())?;
    let mut out = io::stdout().lock();
    shell.run(lines.as_mut(), &mut out)?;

    let bad = shell.target().is_exit_status_bad();
    if bad {
        warn!("program ended with a bad exit status");
    }
    Ok(!bad)
}

fn line_source(
    config: &Config,
    script: Option<&PathBuf>,
    mode: Mode,
) -> SdbResult<Box<dyn LineSource>> {
    if let Some(path) = script {
        let file = File::open(path)
            .with_context(|| format!("failed to open script {}", path.display()))?;
        return Ok(Box::new(Script::new(BufReader::new(file))));
    }
    if mode == Mode::Batch {
        // Never read in batch mode; avoid touching the terminal at all.
        return Ok(Box::new(Script::from_text("")));
    }
    Ok(Box::new(Terminal::new(
        &config.prompt,
        config.history_size,
        config.history_file.clone(),
    )?))
}
