//! Game-link listener.
//!
//! Accepts the companion-plugin connection and pumps newline-delimited JSON
//! in both directions. Exactly one plugin connection is serviced at a time;
//! the single writer here is the only path that touches player-visible state
//! on the game side, which keeps delivery on the scheduler context the game
//! platform requires.

use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, watch};
use tokio_util::codec::{Framed, LinesCodec};
use tracing::{debug, info, warn};

use crate::common::error::GameLinkError;
use crate::game::protocol::{GameCommand, GameEvent};

/// Longest accepted wire line; anything bigger is a protocol violation.
const MAX_LINE_LENGTH: usize = 8 * 1024;

/// Listener for the companion-plugin link.
pub struct GameListener {
    listen_addr: String,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    command_rx: mpsc::UnboundedReceiver<GameCommand>,
    shutdown_rx: watch::Receiver<bool>,
}

impl GameListener {
    pub fn new(
        listen_addr: String,
        event_tx: mpsc::UnboundedSender<GameEvent>,
        command_rx: mpsc::UnboundedReceiver<GameCommand>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            listen_addr,
            event_tx,
            command_rx,
            shutdown_rx,
        }
    }

    /// Accept-and-serve loop. Returns only on bind failure or shutdown.
    pub async fn run(mut self) -> Result<(), GameLinkError> {
        let listener = TcpListener::bind(&self.listen_addr).await.map_err(|e| {
            GameLinkError::BindFailed {
                addr: self.listen_addr.clone(),
                source: e,
            }
        })?;
        info!("Game link listening on {}", self.listen_addr);

        loop {
            // While no plugin is connected, delivery commands have nowhere
            // to go; drop them loudly rather than queueing unbounded.
            let stream = tokio::select! {
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            info!("Game server connected from {}", peer);
                            stream
                        }
                        Err(e) => {
                            warn!("Game link accept failed: {}", e);
                            continue;
                        }
                    }
                }
                command = self.command_rx.recv() => {
                    match command {
                        Some(command) => {
                            warn!("Game server not connected; dropping {:?}", command);
                            continue;
                        }
                        None => {
                            debug!("Game command channel closed");
                            return Ok(());
                        }
                    }
                }
                _ = self.shutdown_rx.changed() => {
                    if *self.shutdown_rx.borrow() {
                        info!("Shutdown signal received, closing game link");
                        return Ok(());
                    }
                    continue;
                }
            };

            self.serve_connection(stream).await;
            if *self.shutdown_rx.borrow() {
                return Ok(());
            }
            info!("Game server disconnected; waiting for reconnect");
        }
    }

    /// Pump one plugin connection until it drops or we shut down.
    async fn serve_connection(&mut self, stream: TcpStream) {
        let mut framed = Framed::new(stream, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));

        loop {
            tokio::select! {
                line = framed.next() => {
                    match line {
                        Some(Ok(line)) => {
                            match serde_json::from_str::<GameEvent>(&line) {
                                Ok(event) => {
                                    if self.event_tx.send(event).is_err() {
                                        debug!("Game event channel closed");
                                        return;
                                    }
                                }
                                Err(e) => {
                                    warn!("Ignoring malformed game event: {} ({})", line, e);
                                }
                            }
                        }
                        Some(Err(e)) => {
                            warn!("Game link read error: {}", e);
                            return;
                        }
                        None => return,
                    }
                }
                command = self.command_rx.recv() => {
                    let Some(command) = command else {
                        debug!("Game command channel closed");
                        return;
                    };
                    let line = match serde_json::to_string(&command) {
                        Ok(line) => line,
                        Err(e) => {
                            warn!("Failed to encode game command: {}", e);
                            continue;
                        }
                    };
                    if let Err(e) = framed.send(line).await {
                        warn!("Game link write error: {}", e);
                        return;
                    }
                }
                _ = self.shutdown_rx.changed() => {
                    if *self.shutdown_rx.borrow() {
                        info!("Shutdown signal received, closing game link");
                        return;
                    }
                }
            }
        }
    }
}
