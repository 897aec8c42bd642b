#[macro_use]
extern crate log;

use fib_efficiency::{cli, Error, FibBench};
use std::process;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fib_efficiency=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    init_logging();

    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(Error::ArgParse(e)) => e.exit(),
        Err(e) => {
            error!("{}", e);
            process::exit(2);
        }
    };

    let bench = FibBench::default().configure_from_args(args);
    match bench.run() {
        Ok(summary) => info!(
            "Measured {} small-n and {} large-n results",
            summary.small.len(),
            summary.large.len()
        ),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
