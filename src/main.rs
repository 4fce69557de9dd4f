use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use sysnap::app::run_with;
use sysnap::config::{Config, OutputFormat, load_config, load_config_from_path};
use sysnap::logging::init_tracing;
use sysnap::report::text::render_text;
use sysnap::system::aggregator::Aggregator;

#[derive(Parser)]
#[command(
    name = "sysnap",
    about = "Point-in-time snapshot of CPU, memory, disks, network and top processes"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of top processes to show
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    top: Option<i64>,

    /// CPU sampling window in milliseconds
    #[arg(long)]
    sample_ms: Option<u64>,

    /// Ranking key for top processes: memory, cpu
    #[arg(long)]
    rank_by: Option<String>,

    /// Per-collector deadline in milliseconds (0 disables)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Output format: text, json
    #[arg(long)]
    format: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long, default_value_t = false)]
    log_json: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json)?;

    let config = load_config_for_cli(&cli);
    // Validated up front so a bad flag never starts the runtime.
    let settings = config.validate()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let aggregator = Aggregator::system(settings.sample_interval, settings.collector_timeout);
    let report = runtime.block_on(run_with(&aggregator, &settings));
    // A collector past its deadline may still be blocked in the OS; don't wait for it.
    runtime.shutdown_background();

    match settings.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            load_config_from_path(path)
        }
        None => load_config(),
    };

    if let Some(top) = cli.top {
        config.general.top = top;
    }
    if let Some(ms) = cli.sample_ms {
        config.general.sample_interval_ms = ms;
    }
    if let Some(ref key) = cli.rank_by {
        config.general.rank_by = key.clone();
    }
    if let Some(ms) = cli.timeout_ms {
        config.general.collector_timeout_ms = ms;
    }
    if let Some(ref format) = cli.format {
        config.general.format = format.clone();
    }

    config
}
