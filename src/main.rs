use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mercadito::config::fetch_config;
use mercadito::feed::FeedAssembler;
use mercadito::tui::event::{spawn_event_reader, spawn_tick_timer};
use mercadito::tui::tabs::feed::plain_listing;
use mercadito::tui::{self, Action, App, FeedLoader, Message};
use mercadito::{MercaditoError, Result};

/// UI tick interval driving notice expiry.
const TICK_INTERVAL_MS: u64 = 250;

#[tokio::main]
async fn main() -> Result<()> {
    let config = fetch_config()?;
    init_tracing(&config.log_file)?;

    let assembler = Arc::new(FeedAssembler::new(config.feed)?);
    info!("Starting storefront for {}", assembler.market());

    let once = std::env::args().skip(1).any(|arg| arg == "--once");
    if once || !io::stdout().is_terminal() {
        return print_feed(&assembler).await;
    }
    run_tui(assembler).await
}

/// Sends tracing output to the log file so it never lands on the TUI.
fn init_tracing(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| MercaditoError::Io(format!("failed to open {}: {e}", path.display())))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Runs a single refresh and prints the feed to stdout.
async fn print_feed(assembler: &FeedAssembler) -> Result<()> {
    let products = assembler.refresh(&CancellationToken::new()).await.map_err(|e| {
        error!("Failed to load products: {e}");
        e
    })?;
    print!("{}", plain_listing(&products, assembler.market()));
    Ok(())
}

/// Runs the interactive storefront until the shopper quits.
async fn run_tui(assembler: Arc<FeedAssembler>) -> Result<()> {
    let mut terminal = tui::setup_terminal()?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx.clone(), TICK_INTERVAL_MS);
    let signal_tx = tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = signal_tx.send(Message::Quit);
        }
    });

    let mut app = App::new(assembler.market());
    let mut loader = FeedLoader::new(assembler, tx);
    loader.start(&mut app);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| tui::render(frame, &app)) {
            break Err(MercaditoError::Io(format!("failed to draw: {e}")));
        }
        let Some(message) = rx.recv().await else {
            break Ok(());
        };
        if let Some(Action::Refresh) = tui::update(&mut app, message) {
            loader.start(&mut app);
        }
        if app.should_quit {
            break Ok(());
        }
    };

    loader.shutdown();
    tui::restore_terminal(&mut terminal)?;
    info!("Storefront closed");
    result
}
