use clap::Parser;
use shrinkpic::args::{CliArgs, Settings};
use shrinkpic::imaging::RustBackend;
use shrinkpic::{compress, config, output};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_config(args.config.as_deref())?;
    let backend = RustBackend::new();
    let settings = Settings::resolve(args, &backend, &config)?;

    output::print_input_size(settings.asset.byte_size, &settings.budget);
    let report = compress::compress(&backend, &settings, &config)?;
    output::print_report(&report);
    info!(
        input_bytes = report.input_bytes,
        output_bytes = report.output.bytes,
        attempts = report.attempts.len(),
        "compressed"
    );

    Ok(())
}

/// Log to stderr so stdout carries only the report.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` turns on this crate's
/// debug events and the default is warnings only.
fn init_tracing(verbose: bool) {
    let default = if verbose { "shrinkpic=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
