use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod cli;

fn main() {
    let cli = args::Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr. `PAGEKEEP_LOG` takes an `EnvFilter` directive and wins
/// over `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "pagekeep=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("PAGEKEEP_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
