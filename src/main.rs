use std::process::ExitCode;

use clap::Parser;
use i18n_check::cli::{Arguments, ExitStatus, report, run_cli};
use i18n_check::orchestrator::Disposition;

fn main() -> ExitCode {
    let args = Arguments::parse();

    match run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            report::print_disposition(&Disposition::Unhandled {
                error: format!("{:#}", err),
            });
            ExitStatus::Error.into()
        }
    }
}
