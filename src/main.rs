use clap::Parser;
use emotioneye::core::config::{self, CliOverrides};
use emotioneye::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "emotioneye", about = "Chat with the EmotionEye analysis service")]
struct Args {
    /// Host the client runs against; local hosts talk to the development server
    #[arg(long)]
    host: Option<String>,

    /// Where to write the diagnostic log
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("Ignoring config file: {e}");
        config::EmotionEyeConfig::default()
    });
    // Nothing is logged until the logger below is up
    let bad_level = config::unknown_log_level(&file_config).map(str::to_string);
    if let Some(level) = &bad_level {
        eprintln!("Unknown log level '{level}', using default");
    }
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            host: args.host,
            log_file: args.log_file,
        },
    );

    // The terminal belongs to the UI, so diagnostics go to a file
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "EmotionEye starting up (host: {}, log level: {})",
        resolved.host,
        resolved.log_level
    );
    if let Some(level) = bad_level {
        log::warn!("Unknown log level '{}' in config, using default", level);
    }
    log::debug!("Config: {:?}", resolved);

    tui::run(resolved)
}
