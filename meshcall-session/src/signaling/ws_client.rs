use crate::error::SessionError;
use crate::signaling::signaling_output::SignalingOutput;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use meshcall_core::{ClientMessage, PeerId, RoomId, ServerMessage, SignalPayload};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{error, info, warn};

/// WebSocket client for the signaling relay.
///
/// Inbound messages are decoded and pushed onto the channel handed to
/// `connect`; when the socket drops, that channel closes, which the session
/// loop treats as transport loss.
pub struct WsSignaling {
    out_tx: mpsc::UnboundedSender<Message>,
}

impl WsSignaling {
    pub async fn connect(
        url: &str,
    ) -> Result<(Self, mpsc::Receiver<ServerMessage>), SessionError> {
        let (socket, _) = connect_async(url)
            .await
            .map_err(|e| SessionError::Signaling(e.into()))?;
        info!("signaling connected: {url}");

        let (mut sink, mut stream) = socket.split();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<Message>();
        let (signal_tx, signal_rx) = mpsc::channel::<ServerMessage>(256);

        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                if sink.send(msg).await.is_err() {
                    break;
                }
            }
        });

        tokio::spawn(async move {
            while let Some(Ok(msg)) = stream.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ServerMessage>(&text) {
                        Ok(decoded) => {
                            if signal_tx.send(decoded).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => warn!("invalid signaling message: {e}"),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            info!("signaling stream ended");
            // signal_tx drops here; the session sees the channel close.
        });

        Ok((Self { out_tx }, signal_rx))
    }

    fn send(&self, msg: &ClientMessage) {
        match serde_json::to_string(msg) {
            Ok(json) => {
                if self.out_tx.send(Message::Text(json)).is_err() {
                    warn!("signaling writer gone, message dropped");
                }
            }
            Err(e) => error!("failed to serialize signaling message: {e}"),
        }
    }
}

#[async_trait]
impl SignalingOutput for WsSignaling {
    async fn announce_join(&self, room: RoomId) {
        self.send(&ClientMessage::Join { room_id: room });
    }

    async fn announce_leave(&self, room: RoomId) {
        self.send(&ClientMessage::Leave { room_id: room });
    }

    async fn send_signal(&self, target: PeerId, signal: SignalPayload) {
        self.send(&ClientMessage::Signal { target, signal });
    }

    async fn close(&self) {
        let _ = self.out_tx.send(Message::Close(None));
    }
}
