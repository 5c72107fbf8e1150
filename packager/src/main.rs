//! Link Collector release packager entrypoint.
//!
//! Packages the extension assets in the working directory into
//! `link-collector.zip`, printing per-asset status and upload instructions.

use clap::Parser;
use link_collector_packager::assembler::{PackageParams, assemble, clean};
use link_collector_packager::cli::Cli;
use link_collector_packager::error::Result;
use link_collector_packager::layout::PackageLayout;
use link_collector_packager::output::report_text;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stdout);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write) -> Result<()> {
    let layout = PackageLayout::resolve(cli.working_dir.as_deref())?;

    if cli.clean {
        return run_clean(cli, &layout, stdout);
    }

    let params = PackageParams {
        strict: cli.strict,
        write_metadata: cli.metadata,
        ..PackageParams::new(layout)
    };
    let mut sink = std::io::sink();
    let progress: &mut dyn Write = if cli.quiet { &mut sink } else { &mut *stdout };
    let output = assemble(&params, progress)?;

    if !cli.quiet {
        write_line(stdout, report_text(&output));
    }
    Ok(())
}

/// Removes previous outputs and reports what was deleted.
fn run_clean(cli: &Cli, layout: &PackageLayout, stdout: &mut dyn Write) -> Result<()> {
    let removed = clean(layout)?;
    if cli.quiet {
        return Ok(());
    }

    if removed.is_empty() {
        write_line(stdout, "Nothing to clean");
    }
    for path in removed {
        write_line(stdout, format!("Removed {path}"));
    }
    Ok(())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_line(stderr, format!("ERROR: {err}"));
            1
        }
    }
}

fn write_line(out: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(out, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}
