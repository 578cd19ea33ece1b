use anyhow::{Context, Result};
use clap::Parser;
use rask_log_dispatch::app::{Cli, init_diagnostics};
use rask_log_dispatch::{DispatchReport, VERSION};
use std::io;
use std::process::ExitCode;
use tracing::info;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(reports) => report_failures(&reports),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Vec<DispatchReport>> {
    let config = cli.load_config().context("Failed to load configuration")?;
    init_diagnostics(&config.diagnostics).context("Failed to initialize diagnostics")?;

    info!(
        version = VERSION,
        sinks = config.sinks.len(),
        mode = %config.dispatch_mode,
        "Starting rask-log-dispatch"
    );

    let logger = config.build().context("Failed to build logger")?;

    let reports = if cli.stdin {
        cli.dispatch_lines(&logger, io::stdin().lock())
            .context("Failed to log stdin")?
    } else {
        vec![cli.dispatch_args(&logger).context("Failed to log messages")?]
    };

    if let Err(e) = logger.flush() {
        eprintln!("Warning: {e}");
    }

    Ok(reports)
}

/// Sink failures do not stop the run; they are listed once it is over.
fn report_failures(reports: &[DispatchReport]) -> ExitCode {
    let failures: Vec<_> = reports.iter().flat_map(|r| &r.failures).collect();
    if failures.is_empty() {
        return ExitCode::SUCCESS;
    }

    for failure in &failures {
        eprintln!("Error: {failure}");
    }
    ExitCode::FAILURE
}
