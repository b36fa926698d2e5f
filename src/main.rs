mod cli;
mod config;
mod error;
mod output;
mod pages;

use std::time::Duration;

use clap::Parser;
use listview::{Machine, Provider, Session};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use cli::{Command, RowAction, SessionAction};
use error::CtlError;
use pages::{session_triggers, Console};

#[tokio::main]
async fn main() {
    let args = cli::Cli::parse();

    // Initialize tracing
    let filter = args
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let (config, account) = config::load(&args);
    if let Err(e) = config.validate() {
        error!(error = %e, "invalid configuration");
        std::process::exit(1);
    }
    info!(
        server = %config.server_url,
        owner = %account.owner,
        user = %account.name,
        "consolectl starting"
    );

    let cancel = CancellationToken::new();

    // Signal handler
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("received SIGINT, shutting down");
        cancel_clone.cancel();
    });

    // Also handle SIGTERM on unix
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
                Err(e) => error!(error = %e, "failed to register SIGTERM handler"),
            }
        });
    }

    let console = Console::new(config, account, args.json, cancel);
    if let Err(e) = run(&console, args.command).await {
        error!(error = %e, "command failed");
        std::process::exit(1);
    }
}

async fn run(console: &Console, command: Command) -> Result<(), CtlError> {
    match command {
        Command::Machines { action } => run_rows::<Machine>(console, action).await,
        Command::Providers { action } => run_rows::<Provider>(console, action).await,
        Command::Sessions { action } => match action {
            SessionAction::List(args) => {
                console
                    .list::<Session>(&args.list, session_triggers(&args))
                    .await
            }
            SessionAction::Delete(args) => console.delete_session(&args.id, &args.list).await,
            SessionAction::Disconnect { id } => console.disconnect(&id).await,
            SessionAction::Watch(args) => {
                console
                    .watch(&args.list, Duration::from_millis(args.interval_ms.max(1)))
                    .await
            }
        },
    }
}

async fn run_rows<R: output::TableRow>(console: &Console, action: RowAction) -> Result<(), CtlError> {
    match action {
        RowAction::List(args) => console.list::<R>(&args, Vec::new()).await,
        RowAction::Add => console.add::<R>().await,
        RowAction::Delete(args) => console.delete::<R>(&args.id, &args.list, Vec::new()).await,
    }
}
