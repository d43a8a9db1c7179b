//! Background feed refreshes.
//!
//! Each refresh runs on its own task under a child of the loader's root
//! [`CancellationToken`]. Starting a refresh cancels the previous one, and
//! [`FeedLoader::shutdown`] cancels whatever is in flight when the UI goes
//! away, so no late result is ever delivered.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::MercaditoError;
use crate::feed::FeedAssembler;

use super::app::App;
use super::event::Message;

/// Starts feed refreshes and reports them back to the UI loop.
pub struct FeedLoader {
    assembler: Arc<FeedAssembler>,
    tx: mpsc::UnboundedSender<Message>,
    root: CancellationToken,
    current: Option<CancellationToken>,
}

impl FeedLoader {
    pub fn new(assembler: Arc<FeedAssembler>, tx: mpsc::UnboundedSender<Message>) -> Self {
        Self {
            assembler,
            tx,
            root: CancellationToken::new(),
            current: None,
        }
    }

    /// Starts a refresh, superseding any refresh still running.
    pub fn start(&mut self, app: &mut App) {
        if let Some(previous) = self.current.take() {
            previous.cancel();
        }
        let generation = app.begin_refresh();
        let token = self.root.child_token();
        self.current = Some(token.clone());

        let assembler = Arc::clone(&self.assembler);
        let tx = self.tx.clone();
        info!("Starting feed refresh {generation}");
        tokio::spawn(async move {
            let result = assembler.refresh(&token).await;
            if matches!(result, Err(MercaditoError::Cancelled)) {
                debug!("Feed refresh {generation} cancelled");
                return;
            }
            let _ = tx.send(Message::FeedLoaded { generation, result });
        });
    }

    /// Cancels every refresh in flight.
    pub fn shutdown(&self) {
        self.root.cancel();
    }
}
