//! # Tomzora Binary
//!
//! Terminal front end. Reads commands from stdin, prints gallery updates to
//! stdout and logs to stderr.

mod cli;
mod render;

use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context};
use configs::{AppConfig, LogConfig, StoreBackend, StoreConfig};
use domains::{LocalStore, PhotoSource};
use secrecy::SecretString;
use services::{GalleryService, Ledger};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[cfg(feature = "store-file")]
use storage_adapters::JsonFileStore;
#[cfg(feature = "store-memory")]
use storage_adapters::MemoryStore;

#[cfg(feature = "unsplash")]
use source_adapters::UnsplashSource;

use crate::cli::Input;

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    if log.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .init();
    }
}

fn open_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn LocalStore>> {
    match config.backend {
        #[cfg(feature = "store-file")]
        StoreBackend::File => Ok(Arc::new(JsonFileStore::open(&config.path)?)),
        #[cfg(feature = "store-memory")]
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        #[allow(unreachable_patterns)]
        other => bail!("store backend {other:?} is not compiled in"),
    }
}

#[cfg(feature = "unsplash")]
fn photo_source(base_url: &str, access_key: SecretString) -> anyhow::Result<Arc<dyn PhotoSource>> {
    Ok(Arc::new(UnsplashSource::new(base_url, access_key)?))
}

#[cfg(not(feature = "unsplash"))]
fn photo_source(_base_url: &str, _access_key: SecretString) -> anyhow::Result<Arc<dyn PhotoSource>> {
    bail!("built without a photo source")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1. Settings and logging
    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(&config.log);

    // 2. Local store and the ledger on top of it
    let store = open_store(&config.store).context("opening local store")?;
    let ledger = Ledger::new(store);

    // 3. Photo service client
    let source = photo_source(&config.unsplash.base_url, config.unsplash.access_key)?;

    // 4. Wire the service to the terminal
    let (command_tx, command_rx) = mpsc::channel(32);
    let (update_tx, mut update_rx) = mpsc::unbounded_channel();
    let service = tokio::spawn(GalleryService::new(source, ledger, update_tx).run(command_rx));
    let printer = tokio::spawn(async move {
        let mut printer = render::Printer::new();
        while let Some(update) = update_rx.recv().await {
            if let Some(text) = printer.print(&update, Instant::now()) {
                println!("{text}");
            }
        }
    });

    info!(backend = ?config.store.backend, "tomzora ready");
    println!("{}", cli::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match cli::parse_command(&line) {
            Ok(Input::Command(command)) => {
                if command_tx.send(command).await.is_err() {
                    warn!("gallery service is gone");
                    break;
                }
            }
            Ok(Input::Help) => println!("{}", cli::HELP),
            Ok(Input::Quit) => break,
            Ok(Input::Nothing) => {}
            Err(e) => println!("[error] {e}"),
        }
    }

    drop(command_tx);
    service.await?;
    printer.await?;
    Ok(())
}
