//! file-elf - terminal search client.
//!
//! Loads client.toml, connects to the local search service, and runs a
//! line-driven search view on stdin/stdout.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use elf_client::{ChannelInvoker, DesktopHost, HttpInvoker, Invoker, RoutedInvoker};
use elf_core::ClientConfig;
use elf_ui::views::{parse_line, render_notification, render_results, render_view, TerminalInput, HELP};
use elf_ui::{NotificationQueue, SearchView, SystemClipboard};
use tokio::io::{AsyncBufReadExt, BufReader};

// =============================================================================
// Command Line
// =============================================================================

#[derive(Parser, Debug)]
#[command(name = "file-elf", version, about = "Search your indexed files from the terminal")]
struct Args {
    /// Search service endpoint (overrides client.toml)
    #[arg(long)]
    endpoint: Option<String>,

    /// Path to client.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset, e.g. "debug"
    #[arg(long)]
    log_level: Option<String>,
}

fn load_config(args: &Args) -> Result<ClientConfig, String> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::load_from(path),
        None => ClientConfig::load(),
    }
    .map_err(|e| format!("Failed to load config: {}", e))?;

    if let Some(endpoint) = &args.endpoint {
        config.service.endpoint = endpoint.clone();
    }
    if let Some(level) = &args.log_level {
        config.log.level = level.clone();
    }
    Ok(config)
}

// =============================================================================
// Terminal Loop
// =============================================================================

async fn run(config: ClientConfig) -> Result<(), String> {
    let backend: Arc<dyn Invoker> = Arc::new(HttpInvoker::from_config(&config.service));
    let desktop: Arc<dyn Invoker> = Arc::new(ChannelInvoker::spawn(DesktopHost::from_config(
        &config.editor,
    )));
    let invoker: Arc<dyn Invoker> = Arc::new(RoutedInvoker::new(backend, desktop));
    tracing::info!(endpoint = %config.service.endpoint, "Invoker ready");

    let notifications = NotificationQueue::from_config(&config.notifications);
    let mut view = SearchView::new(
        invoker,
        Arc::new(SystemClipboard::default()),
        notifications,
        config.backend.config_file.clone(),
    );

    let mut results_rx = view.dispatcher().subscribe();
    let mut notes_rx = view.notifications().subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => return Err(format!("Failed to read input: {}", e)),
                };
                match parse_line(&line) {
                    Ok(TerminalInput::Search(text)) => {
                        view.handle(elf_ui::InputEvent::EntryChanged(text));
                        view.handle(elf_ui::InputEvent::EnterPressed);
                    }
                    Ok(TerminalInput::Event(event)) => {
                        let before = view.query().clone();
                        view.handle(event);
                        if view.query() != &before {
                            println!("{}", render_view(view.query(), &view.dispatcher().results()));
                        }
                    }
                    Ok(TerminalInput::Help) => println!("{}", HELP),
                    Ok(TerminalInput::Quit) => break,
                    Ok(TerminalInput::Empty) => {}
                    Err(message) => println!("{}", message),
                }
            }
            Ok(()) = results_rx.changed() => {
                let list = results_rx.borrow_and_update().clone();
                println!("{}", render_results(&list));
            }
            Ok(()) = notes_rx.changed() => {
                if let Some(line) = render_notification(&notes_rx.borrow_and_update()) {
                    println!("{}", line);
                }
            }
        }
    }

    tracing::info!("Exiting");
    Ok(())
}

// =============================================================================
// Entry Point
// =============================================================================

fn main() {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("file-elf starting...");

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = rt.block_on(run(config)) {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
