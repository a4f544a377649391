//! Subscriber setup for the CLI.
//!
//! Events go to stderr so that stdout stays clean for reports and JSON.

use clap::{Args, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::error::{DoctorError, Result};

pub const LOG_ENV: &str = "VCHK_LOG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    #[arg(long = "log-format", value_enum, default_value_t = LogFormat::Text, global = true)]
    pub format: LogFormat,

    /// Filter directive, e.g. `debug` or `vchk_core=trace`.
    #[arg(long = "log-level", env = LOG_ENV, default_value = "warn", global = true)]
    pub level: String,
}

pub fn init_logging(args: &LogArgs) -> Result<()> {
    let filter = EnvFilter::try_new(&args.level).map_err(|error| {
        DoctorError::invalid(format!("--log-level {:?}: {error}", args.level))
    })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = match args.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().flatten_event(true).try_init(),
    };
    installed.map_err(|error| DoctorError::Logging {
        message: error.to_string(),
    })
}
