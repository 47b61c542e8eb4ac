/*!
 * Command-line interface for filtergen
 */

use std::io;

use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use filtergen::config::{Args, Config};
use filtergen::generator::Generator;
use filtergen::report::Reporter;

/// Diagnostics go to stderr; stdout only carries the confirmation
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "filtergen=warn".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "filtergen", &mut io::stdout());
        return Ok(());
    }

    init_tracing();

    let config = Config::from_args(args)?;
    config.validate()?;

    let reporter = Reporter::new(config.report_format);
    let report = Generator::new(config).run()?;
    reporter.print_report(&report);

    Ok(())
}
