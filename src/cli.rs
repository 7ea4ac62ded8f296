//! CLI argument parsing via clap.

use std::path::PathBuf;

use clap::Parser;
use nowshowing::build_info::LONG_VERSION;
use nowshowing::sign::BartenderPolicy;

/// Render a "now showing" sign from a config.json and room.txt.
#[derive(Debug, Parser)]
#[command(name = "nowshowing", version, long_version = LONG_VERSION)]
pub struct Args {
    /// Base URL or directory holding config.json and room.txt.
    #[arg(short = 's', long = "source", default_value = ".")]
    pub source: String,

    /// Host HTML page to render into (default: built-in layout).
    #[arg(short = 'p', long = "page")]
    pub page: Option<PathBuf>,

    /// Where to write the rendered page.
    #[arg(short = 'o', long = "out", default_value = "now-showing.html")]
    pub out: PathBuf,

    /// Render once and exit instead of keeping the clock running.
    #[arg(long = "once")]
    pub once: bool,

    /// How to treat a config without `bartender_enabled`.
    #[arg(long = "bartender", value_enum, default_value_t = BartenderPolicy::ShownUnlessDisabled)]
    pub bartender: BartenderPolicy,

    /// Per-request timeout when fetching over HTTP.
    #[arg(long = "fetch-timeout-secs", default_value_t = 20)]
    pub fetch_timeout_secs: u64,
}
