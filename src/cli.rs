//! Command-line argument parsing for the `glyph` binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The Glyph source file to run.
    #[arg(index = 1)]
    pub file: PathBuf,

    /// Log level for the interpreter's own diagnostics.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,

    /// Echo every statement and call dispatch to stderr as it runs.
    #[arg(long)]
    pub trace: bool,
}

impl Cli {
    pub fn init() -> Cli {
        Cli::parse()
    }
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    /// Only fatal name/type/fault errors are logged.
    #[default]
    #[value(alias("0"))]
    Error,
    #[value(alias("1"))]
    Warn,
    /// Also logs declaration loading and `main` invocation.
    #[value(alias("2"))]
    Info,
    #[value(alias("3"))]
    Debug,
    /// Logs every statement and call dispatch.
    #[value(alias("4"))]
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> log::Level {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}
