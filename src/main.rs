mod browse;
mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::io;

use clap::Parser;
use cli::Command;
use postkit::Postkit;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::AppError;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize tracing
    let filter = cli
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Shared cancellation token + signal handlers.
    let cancel = setup_signal_handlers();

    if let Err(e) = run(&cli, cancel).await {
        match e {
            // Field messages were already printed.
            AppError::Rejected(what) => info!("{what} rejected"),
            e => tracing::error!(error = %e, "command failed"),
        }
        std::process::exit(1);
    }
}

async fn run(cli: &cli::Cli, cancel: CancellationToken) -> Result<(), AppError> {
    // Rating a password needs no backend.
    if let Command::Strength(args) = &cli.command {
        let strength = postkit::score_password_strength(&args.password);
        return output::write_strength(&strength, &mut io::stdout().lock());
    }

    let config = config::load_config(cli)?;
    info!(api = %config.api_url, page_size = config.page_size, "client configured");
    let client = Postkit::new(config)?;

    match &cli.command {
        Command::Login(credentials) => commands::login(&client, credentials).await,
        Command::Feed(args) => commands::feed(&client, args, cancel).await,
        Command::Browse => browse::run_browse(&client, cancel).await,
        Command::Profile(credentials) => commands::profile(&client, credentials).await,
        Command::Create(args) => commands::create(&client, args).await,
        Command::Edit(args) => commands::edit(&client, args).await,
        Command::Search(args) => commands::search(&client, args).await,
        Command::Comments(args) => commands::comments(&client, args).await,
        Command::Users(args) => commands::users(&client, args).await,
        Command::Strength(_) => Ok(()),
    }
}

/// Register SIGINT and SIGTERM handlers that trigger the returned token.
fn setup_signal_handlers() -> CancellationToken {
    let cancel = CancellationToken::new();

    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("received SIGINT, shutting down");
        cancel_clone.cancel();
    });

    #[cfg(unix)]
    {
        let cancel_clone = cancel.clone();
        tokio::spawn(async move {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut sig) => {
                    sig.recv().await;
                    info!("received SIGTERM, shutting down");
                    cancel_clone.cancel();
                }
                Err(e) => warn!(error = %e, "failed to register SIGTERM handler"),
            }
        });
    }

    cancel
}
