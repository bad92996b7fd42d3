use async_trait::async_trait;
use meshcall_core::{PeerId, RoomId, SignalPayload};

/// Outbound half of the signaling relay. The session orchestrator is the
/// only caller; implementations log delivery failures rather than surface
/// them (loss of the whole channel shows up as the inbound stream closing).
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Announce our presence in a room.
    async fn announce_join(&self, room: RoomId);

    /// Announce our departure from a room.
    async fn announce_leave(&self, room: RoomId);

    /// Relay a negotiation payload to one peer.
    async fn send_signal(&self, target: PeerId, signal: SignalPayload);

    /// Release the underlying signaling session.
    async fn close(&self);
}
