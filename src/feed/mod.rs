//! WebSocket event feed: connect, subscribe, forward decoded events.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use kanal::AsyncSender;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{info, warn};

use crate::api::SubscribeMessage;
use crate::models::{ServerEvent, Session};

pub struct EventFeed {
    pub url: String,
    pub session: Session,
    pub event_sender: Arc<AsyncSender<ServerEvent>>,
}

impl EventFeed {
    pub fn new(url: &str, session: Session, event_sender: Arc<AsyncSender<ServerEvent>>) -> Self {
        Self {
            url: url.to_string(),
            session,
            event_sender,
        }
    }

    /// Connect, send the subscribe request, then forward every decodable
    /// frame until the stream ends. There is no reconnect: a dropped
    /// connection is reported once and the task stops.
    pub async fn start(self) {
        let mut stream = match connect_async(self.url.as_str()).await {
            Ok((stream, _)) => stream,
            Err(error) => {
                warn!(url = %self.url, %error, "failed to open event stream");
                return;
            }
        };
        self.session.set_connected(true);
        info!(url = %self.url, "event stream connected");

        let subscribe = SubscribeMessage {
            action: "subscribe".to_string(),
            playerid: self.session.player_id.clone(),
        };
        let payload = match serde_json::to_string(&subscribe) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(%error, "failed to encode subscription request");
                self.session.set_connected(false);
                return;
            }
        };
        if let Err(error) = stream.send(Message::Text(payload)).await {
            warn!(%error, "failed to send subscription request");
            self.session.set_connected(false);
            return;
        }
        info!(player_id = %self.session.player_id, "subscription request sent");

        while let Some(frame) = stream.next().await {
            let frame = match frame {
                Ok(frame) => frame,
                Err(error) => {
                    warn!(%error, "event stream error");
                    break;
                }
            };

            match frame {
                Message::Text(text) => match ServerEvent::decode(&text) {
                    Ok(event) => {
                        if self.event_sender.send(event).await.is_err() {
                            // consumer gone, nothing left to feed
                            break;
                        }
                    }
                    Err(error) => warn!(%error, raw = %text, "discarding undecodable frame"),
                },
                Message::Ping(payload) => {
                    if let Err(error) = stream.send(Message::Pong(payload)).await {
                        warn!(%error, "failed to answer ping");
                        break;
                    }
                }
                Message::Close(_) => {
                    info!("event stream closed by server");
                    break;
                }
                _ => {}
            }
        }

        self.session.set_connected(false);
        info!("event feed stopping");
    }
}
