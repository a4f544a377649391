use std::io::{self, Write};

use clap::{Parser, Subcommand};

use crate::audit::{AuditArgs, KeysArgs, run_audit, run_keys};
use crate::error::Result;
use crate::logging::{LogArgs, init_logging};
use crate::render::{RenderArgs, run_render};
use crate::toggle::{ToggleArgs, run_toggle};

#[derive(Debug, Parser)]
#[command(
    name = "doctor_vchk",
    about = "Render, toggle, and audit verification checklists",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub log: LogArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a checklist file as text.
    Render(RenderArgs),

    /// Apply toggles and print the resulting checklist JSON.
    Toggle(ToggleArgs),

    /// Report shared checks, key collisions, and pass counts.
    Audit(AuditArgs),

    /// Print render keys in order.
    Keys(KeysArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

/// Run a parsed command, writing its report to `out`.
///
/// Logging is not installed here; [`run_from_env`] does that first.
pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    match cli.command {
        Commands::Render(args) => run_render(args, out),
        Commands::Toggle(args) => run_toggle(args, out),
        Commands::Audit(args) => run_audit(args, out),
        Commands::Keys(args) => run_keys(args, out),
    }
}
