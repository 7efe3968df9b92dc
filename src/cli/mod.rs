//! Command-line layer: parse, validate, run, report.

mod args;
mod exit_status;
mod logging;
pub mod report;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::debug;

pub use args::Arguments;
pub use exit_status::ExitStatus;

use crate::config::merge_configs;
use crate::core::Collaborators;
use crate::flags::RunFlags;
use crate::orchestrator::{Disposition, Orchestrator, RunError};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    logging::init(args.verbose);

    let flags = match RunFlags::validate(args.raw_flags()) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("{} {}", "error:".bold().red(), err);
            return Ok(ExitStatus::Failure);
        }
    };

    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    let loaded = merge_configs(&cwd, flags.include_config())?;
    debug!(sources = ?loaded.sources, "configuration loaded");

    let orchestrator = Orchestrator::new(flags, loaded.config, Collaborators::default());
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    let result = runtime.block_on(orchestrator.run());

    match &result {
        Ok(summary) | Err(RunError::Tasks { summary, .. }) => report::print_summary(summary),
        Err(RunError::Unhandled(_)) => {}
    }

    let disposition = Disposition::from_run(&result, orchestrator.reporter());
    report::print_disposition(&disposition);

    Ok(match disposition {
        Disposition::Success => ExitStatus::Success,
        Disposition::ReportedFailure { .. } | Disposition::PartialFailure { .. } => {
            ExitStatus::Failure
        }
        Disposition::Unhandled { .. } => ExitStatus::Error,
    })
}
