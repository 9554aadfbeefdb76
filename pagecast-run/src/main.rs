//! pagecast - one relay run from a Telegram channel to a Facebook Page
//!
//! Reads the checkpoint, fetches the channel's recent history, republishes
//! the new messages, advances the checkpoint, and exits. Periodic operation
//! comes from an external scheduler (cron, systemd timer).

use clap::Parser;
use libpagecast::config::Config;
use libpagecast::logging::{LogFormat, LoggingConfig};
use libpagecast::pipeline::Relay;
use libpagecast::publish::facebook::FacebookPublisher;
use libpagecast::source::telegram::TelegramSource;
use libpagecast::Result;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "pagecast")]
#[command(version)]
#[command(about = "Relay new Telegram channel posts to a Facebook Page")]
#[command(long_about = "\
pagecast - relay new Telegram channel posts to a Facebook Page

DESCRIPTION:
    pagecast performs one relay run: it reads the local timestamp
    checkpoint, fetches the most recent messages of the configured
    Telegram channel, republishes everything newer than the checkpoint
    to the configured Facebook Page (text, plus photo when present),
    and advances the checkpoint.

    Run it from cron or a systemd timer for periodic operation. A
    failed fetch leaves the checkpoint untouched, so the next run
    retries the same window.

USAGE:
    # One run with settings from the environment / .env
    pagecast

    # Override the batch size for this run
    pagecast --limit 10

    # Enable verbose logging
    pagecast --verbose

CONFIGURATION (environment variables):
    Required: TELEGRAM_API_ID, TELEGRAM_API_HASH, TELEGRAM_PHONE,
              TELEGRAM_CHANNEL, FACEBOOK_PAGE_TOKEN, FACEBOOK_PAGE_ID
    Optional: COPY_EXACT_TEXT, POST_SUFFIX, HASHTAGS, CHECKPOINT_FILE,
              IMAGE_DIR, TELEGRAM_SESSION, GRAPH_API_BASE, BATCH_LIMIT

    The Telegram session must be authorized first: run pagecast-check.

EXIT CODES:
    0 - Run completed (per-message publish failures are logged, not fatal)
    1 - Configuration, source, or checkpoint error
    2 - Telegram authentication error
")]
struct Cli {
    /// Fetch up to this many recent messages (overrides BATCH_LIMIT)
    #[arg(long, value_name = "COUNT")]
    limit: Option<usize>,

    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Log output format: text, json, or pretty
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    LoggingConfig::new(cli.log_format, "info".to_string(), cli.verbose).init();

    if let Err(e) = run(&cli).await {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(limit) = cli.limit {
        config.relay.batch_limit = limit;
    }

    info!(
        channel = %config.telegram.channel,
        page_id = %config.facebook.page_id,
        copy_exact = config.relay.copy_exact,
        "starting relay run"
    );

    let source = TelegramSource::connect(&config.telegram).await?;
    let publisher = FacebookPublisher::new(&config.facebook);

    let relay = Relay::new(Box::new(source), Box::new(publisher), config.relay);
    let report = relay.run().await?;

    if report.published > 0 || report.failed > 0 {
        info!(
            published = report.published,
            failed = report.failed,
            "relay run finished"
        );
    }
    Ok(())
}
