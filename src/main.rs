//! Runs the default workload: 5 real and 5 dummy actors per role, 5 rounds
//! each. The access table goes to stdout, diagnostics to stderr (`RUST_LOG`).

use std::io;

use gated_rwlock::{Workload, WorkloadConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let config = WorkloadConfig::default();
    Workload::new(&config, io::stdout())?.run()?;

    Ok(())
}
