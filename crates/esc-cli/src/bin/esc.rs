#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use esc_cli::args::{CliArgs, OutputFormat};
use esc_cli::driver::{self, CompilationResult};
use esc_cli::reporter::Reporter;
use esc_cli::watch::{self, RunOutput};

/// Exit status codes, matching tsc's.
const EXIT_SUCCESS: i32 = 0;
const EXIT_DIAGNOSTICS: i32 = 2;

fn main() -> Result<()> {
    // Initialize tracing if ESC_LOG or RUST_LOG is set.
    errorscript::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let pretty = args
        .pretty
        .unwrap_or_else(|| std::io::stdout().is_terminal());
    colored::control::set_override(pretty);

    if args.watch {
        return watch::run(&args, &cwd, |output| match output {
            RunOutput::Checked(result) => {
                if pretty {
                    print!("\x1b[2J\x1b[H");
                }
                if let Err(err) = print_result(&result, args.format, pretty) {
                    eprintln!("error: {err:#}");
                }
            }
            RunOutput::Failed(err) => eprintln!("error: {err:#}"),
        });
    }

    let result = driver::compile(&args, &cwd)?;
    print_result(&result, args.format, pretty)?;
    let code = if result.diagnostic_count() == 0 {
        EXIT_SUCCESS
    } else {
        EXIT_DIAGNOSTICS
    };
    std::process::exit(code);
}

fn print_result(result: &CompilationResult, format: OutputFormat, pretty: bool) -> Result<()> {
    let mut reporter = Reporter::new(pretty);
    reporter.add_sources(result);
    let diagnostics: Vec<_> = result.diagnostics().cloned().collect();
    match format {
        OutputFormat::Json => {
            let json = reporter
                .render_json(&diagnostics)
                .context("failed to serialize diagnostics")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            if !diagnostics.is_empty() {
                println!("{}", reporter.render(&diagnostics));
            }
            if pretty {
                println!("\n{}", reporter.format_summary(diagnostics.len()));
            }
        }
    }
    Ok(())
}
