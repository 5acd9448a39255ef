use std::io;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use safecalc::repl::Session;

/// Verbosity of the diagnostic log written to stderr.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub const fn to_log_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

/// safecalc is an interactive calculator that evaluates arithmetic
/// expressions without executing any code.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

/// Initializes the logger. `RUST_LOG` is read first, then the level from the
/// command line is applied on top of it.
pub fn init_logging(log_level: LogLevel) {
    env_logger::Builder::from_default_env().filter_level(log_level.to_log_level_filter())
                                           .init();
}

/// Runs an interactive session on the terminal.
pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level);
    info!("starting session with log level {:?}", args.log_level);

    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout().lock());
    session.run().context("terminal input/output failed")?;

    info!("session ended");
    Ok(())
}
