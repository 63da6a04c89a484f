use clap::Parser;
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use wellcheck::core::config::{self, CliOverrides, WellcheckConfig};
use wellcheck::tui;

#[derive(Parser)]
#[command(name = "wellcheck", about = "Terminal wellness check-in companion")]
struct Args {
    /// Base URL of the analysis service (overrides config and environment)
    #[arg(long)]
    base_url: Option<String>,

    /// Log level written to wellcheck.log
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,

    /// Let follow-up prompts from earlier turns still fire after a new message
    #[arg(long)]
    no_cancel_stale_follow_ups: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to wellcheck.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("wellcheck.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("Ignoring config file: {}", e);
        WellcheckConfig::default()
    });
    let cli = CliOverrides {
        base_url: args.base_url,
        no_cancel_stale_follow_ups: args.no_cancel_stale_follow_ups,
    };
    let resolved = config::resolve(&file_config, &cli);

    info!("Wellcheck starting up against {}", resolved.base_url);

    tui::run(resolved)
}
