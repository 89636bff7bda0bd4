//! megu-bot: main binary
//!
//! Group chat bot with announcements and a timed number-guessing game.
//!
//! Usage:
//!   megu-bot             - start the bot
//!   megu-bot --help      - show help
//!   megu-bot --version   - show version

use megu_core::Config;
use megu_whatsapp::WhatsAppBot;
use tracing_subscriber::EnvFilter;

/// Run mode
enum RunMode {
    /// Start the bot
    Run,
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match parse_args() {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("megu-bot {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Run => {}
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting megu-bot...");
    tracing::info!("Bridge: {}", config.api_url);

    let bot = WhatsAppBot::new(&config)
        .map_err(|e| anyhow::anyhow!("Failed to create bot: {}", e))?;

    // Shut down cleanly on ctrl-c
    let (shutdown_tx, shutdown_rx) = tokio::sync::broadcast::channel::<()>(1);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
        }
        let _ = shutdown_tx.send(());
    });

    bot.run(shutdown_rx)
        .await
        .map_err(|e| anyhow::anyhow!("Bot error: {}", e))?;

    tracing::info!("megu-bot stopped");
    Ok(())
}

/// Parse command line arguments
fn parse_args() -> RunMode {
    let args: Vec<String> = std::env::args().collect();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            _ => {}
        }
    }

    RunMode::Run
}

/// Print help message
fn print_help() {
    println!("megu-bot {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Group chat bot with announcements and a number-guessing game.");
    println!();
    println!("USAGE:");
    println!("    megu-bot [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show this help");
    println!("    -v, --version    Show version");
    println!();
    println!("ENVIRONMENT:");
    println!("    MEGU_API_URL              WhatsApp REST bridge base URL (required)");
    println!("    MEGU_PHONE_NUMBER         Bot account phone number (required)");
    println!("    MEGU_POLL_INTERVAL_SECS   Polling interval, default 2");
}
