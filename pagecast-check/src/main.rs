//! pagecast-check - pre-flight checks for the relay
//!
//! Validates the configuration, performs the first-time interactive
//! Telegram sign-in (saving the session file the relay reuses), resolves
//! the configured channel, and probes the Facebook page with the page
//! token. Run this once before scheduling pagecast.

use anyhow::{bail, Context, Result};
use clap::Parser;
use grammers_client::{Client, Config as ClientConfig, InitParams, SignInError};
use grammers_session::Session;
use libpagecast::config::{Config, TelegramConfig};
use libpagecast::logging::{LogFormat, LoggingConfig};
use libpagecast::publish::facebook::FacebookPublisher;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "pagecast-check")]
#[command(version)]
#[command(about = "Verify pagecast configuration and connectivity")]
#[command(long_about = "\
pagecast-check - verify pagecast configuration and connectivity

DESCRIPTION:
    pagecast-check validates the environment configuration, signs in to
    Telegram interactively when the saved session is not yet authorized
    (login code, optional 2FA password), resolves the configured channel,
    and fetches the Facebook page object with the page token.

    The relay itself never prompts; run this tool once on a new machine
    so the saved session is ready for unattended runs.

USAGE:
    pagecast-check

    # Skip the Facebook probe (e.g. while only rotating the Telegram session)
    pagecast-check --skip-facebook

EXIT CODES:
    0 - All checks passed
    1 - A check failed
")]
struct Cli {
    /// Skip the Facebook page probe
    #[arg(long)]
    skip_facebook: bool,

    /// Skip the Telegram sign-in and channel resolution
    #[arg(long)]
    skip_telegram: bool,

    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    LoggingConfig::new(LogFormat::Text, "info".to_string(), cli.verbose).init();

    let config = Config::load().context("configuration check failed")?;
    println!("[ok] configuration: all required variables present");

    if !cli.skip_telegram {
        check_telegram(&config.telegram).await?;
    }

    if !cli.skip_facebook {
        let publisher = FacebookPublisher::new(&config.facebook);
        let page_name = publisher
            .check_page()
            .await
            .context("Facebook page probe failed")?;
        println!(
            "[ok] facebook: page '{}' reachable with the configured token",
            page_name
        );
    }

    println!("All checks passed. pagecast is ready to run.");
    Ok(())
}

/// Connect, sign in when needed, and resolve the configured channel
async fn check_telegram(config: &TelegramConfig) -> Result<()> {
    let session = Session::load_file_or_create(&config.session_file)
        .with_context(|| format!("failed to load session {}", config.session_file.display()))?;

    let client = Client::connect(ClientConfig {
        session,
        api_id: config.api_id,
        api_hash: config.api_hash.clone(),
        params: InitParams::default(),
    })
    .await
    .context("failed to connect to Telegram")?;

    if !client.is_authorized().await? {
        sign_in(&client, config).await?;
    }
    println!("[ok] telegram: session authorized");

    let handle = config.channel.trim_start_matches('@');
    match client.resolve_username(handle).await? {
        Some(chat) => {
            info!(channel = %config.channel, "channel resolved");
            println!("[ok] telegram: channel '{}' resolved", chat.name());
        }
        None => bail!("channel '{}' not found", config.channel),
    }

    Ok(())
}

/// Interactive login-code flow; saves the session on success
async fn sign_in(client: &Client, config: &TelegramConfig) -> Result<()> {
    println!("Telegram session not authorized, signing in as {}...", config.phone);

    let token = client
        .request_login_code(&config.phone)
        .await
        .context("failed to request login code")?;
    let code = prompt("Enter the code Telegram sent you: ")?;

    match client.sign_in(&token, code.trim()).await {
        Ok(_) => {}
        Err(SignInError::PasswordRequired(password_token)) => {
            let hint = password_token.hint().unwrap_or("no hint");
            let password = prompt(&format!("Enter your 2FA password (hint: {}): ", hint))?;
            client
                .check_password(password_token, password.trim())
                .await
                .context("2FA password rejected")?;
        }
        Err(SignInError::InvalidCode) => bail!("invalid login code"),
        Err(e) => bail!("sign-in failed: {}", e),
    }

    client
        .session()
        .save_to_file(&config.session_file)
        .with_context(|| format!("failed to save session {}", config.session_file.display()))?;
    println!("[ok] telegram: signed in, session saved to {}", config.session_file.display());
    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    use std::io::{BufRead, Write};

    print!("{}", message);
    std::io::stdout().flush()?;
    let line = std::io::stdin()
        .lock()
        .lines()
        .next()
        .context("stdin closed")??;
    Ok(line)
}
