//! CLI entry point for nowshowing.

mod cli;

use std::time::Duration;

use clap::Parser;
use nowshowing::build_info;
use nowshowing::display::{run, LoadOutcome, RunOptions};
use nowshowing::render::RenderOptions;
use nowshowing::tracing_config;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();

    if let Err(e) = tracing_config::init() {
        eprintln!("warning: failed to initialize logging: {e}");
    }
    tracing::info!(
        version = %build_info::startup_metadata_line(),
        source = %args.source,
        "starting nowshowing"
    );

    let options = RunOptions {
        source: args.source,
        page: args.page,
        out: args.out,
        once: args.once,
        render: RenderOptions {
            bartender: args.bartender,
        },
        fetch_timeout: Duration::from_secs(args.fetch_timeout_secs),
    };

    match run(options).await {
        Ok(LoadOutcome::Rendered { .. }) => {}
        // The error page is already written; exit non-zero so supervisors notice.
        Ok(LoadOutcome::Failed) => std::process::exit(2),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
