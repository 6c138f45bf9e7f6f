//! The streaming channel task: one websocket per client identity, pumping
//! inbound text frames to the application loop until closed from either side.

use std::sync::mpsc;

use client_logging::{client_debug, client_info, client_warn};
use futures_util::StreamExt;
use tokio::sync::watch;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::types::EngineEvent;

#[derive(Debug, Clone)]
pub struct ChannelSettings {
    /// Websocket endpoint, e.g. `ws://localhost:8080/api/v1/ws`.
    pub ws_url: String,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            ws_url: "ws://localhost:8080/api/v1/ws".to_string(),
        }
    }
}

/// Owner-side handle for one channel instance; closing is a one-way signal.
#[derive(Debug)]
pub struct ChannelHandle {
    shutdown: watch::Sender<bool>,
}

impl ChannelHandle {
    pub(crate) fn new(shutdown: watch::Sender<bool>) -> Self {
        Self { shutdown }
    }

    /// Asks the channel task to send a close frame and stop.
    pub fn close(&self) {
        let _ = self.shutdown.send(true);
    }

    /// True once the channel task has ended, for any reason.
    pub fn is_finished(&self) -> bool {
        self.shutdown.is_closed()
    }
}

/// Runs one channel to completion. Emits `ChannelUp` after the handshake,
/// `ChannelFrame` per inbound text frame, and exactly one `ChannelDown` when
/// the task ends.
pub async fn run_channel(
    settings: ChannelSettings,
    client_id: String,
    events: mpsc::Sender<EngineEvent>,
    mut shutdown: watch::Receiver<bool>,
) {
    let url = format!("{}?client_id={client_id}", settings.ws_url);

    let mut socket = match connect_async(url.as_str()).await {
        Ok((socket, _response)) => socket,
        Err(err) => {
            client_warn!("channel connect failed for {}: {}", client_id, err);
            let _ = events.send(EngineEvent::ChannelDown {
                error: Some(err.to_string()),
            });
            return;
        }
    };

    client_info!("channel established for client {}", client_id);
    let _ = events.send(EngineEvent::ChannelUp);

    let error = loop {
        tokio::select! {
            changed = shutdown.changed() => {
                // A dropped sender also counts as a close request.
                if changed.is_err() || *shutdown.borrow() {
                    let _ = socket.close(None).await;
                    break None;
                }
            }
            frame = socket.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        let _ = events.send(EngineEvent::ChannelFrame(text.to_string()));
                    }
                    Some(Ok(Message::Binary(bytes))) => {
                        match String::from_utf8(bytes.to_vec()) {
                            Ok(text) => {
                                let _ = events.send(EngineEvent::ChannelFrame(text));
                            }
                            Err(_) => client_debug!("ignoring non-utf8 binary frame"),
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break None,
                    Some(Ok(_)) => {} // ping/pong handled by the transport
                    Some(Err(err)) => break Some(err.to_string()),
                }
            }
        }
    };

    if let Some(ref err) = error {
        client_warn!("channel error for client {}: {}", client_id, err);
    } else {
        client_info!("channel closed for client {}", client_id);
    }
    let _ = events.send(EngineEvent::ChannelDown { error });
}
