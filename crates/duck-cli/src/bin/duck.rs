#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};

use duck_cli::args::{CheckArgs, CliArgs, Command, OutputFormat};
use duck_cli::driver::{self, EXIT_LOAD_ERROR};
use duck_cli::reporter::{self, Reporter};
use duck_cli::{config, tracing_config};

fn main() {
    // Installs a subscriber only when DUCK_LOG or RUST_LOG is set.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let code = match args.command {
        Command::Check(check) => run_check(&check).unwrap_or_else(|err| {
            eprintln!("error: {err:#}");
            EXIT_LOAD_ERROR
        }),
    };
    std::process::exit(code);
}

fn run_check(args: &CheckArgs) -> Result<i32> {
    let document = config::load_document(&args.document)?;
    let options = args.apply_to(document.compiler_options);
    let report = driver::check(&document, options)
        .with_context(|| format!("failed to check {}", args.document.display()))?;

    let mut stdout = std::io::stdout().lock();
    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut stdout, &reporter::render_json(&report))
                .context("failed to write JSON report")?;
            writeln!(stdout)?;
        }
        OutputFormat::Text => {
            let pretty = args.pretty.unwrap_or_else(|| std::io::stdout().is_terminal());
            write!(stdout, "{}", Reporter::new(pretty).render(&report))?;
        }
    }
    stdout.flush()?;

    Ok(report.exit_code())
}
