use crate::media::LocalMedia;
use anyhow::Result;
use async_trait::async_trait;
use meshcall_core::{IceCandidate, PeerId, SessionDescription};
use std::sync::Arc;
use tokio::sync::mpsc;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_remote::TrackRemote;

/// Events a live peer transport pushes back into the session loop.
pub enum TransportEvent {
    CandidateGenerated(PeerId, IceCandidate),
    RemoteTrack(PeerId, Arc<TrackRemote>),
    Disconnected(PeerId),
}

/// One underlying media connection to a single peer.
///
/// `create_offer`/`create_answer` also apply the produced description as the
/// local description, mirroring how the offer/answer calls are always paired
/// with a local-description application.
#[async_trait]
pub trait PeerTransport: Send + Sync {
    async fn create_offer(&self) -> Result<SessionDescription>;

    async fn create_answer(&self) -> Result<SessionDescription>;

    async fn set_remote_description(&self, desc: SessionDescription) -> Result<()>;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<()>;

    /// Swap the outbound video sender's track without renegotiation.
    async fn replace_video_track(&self, track: Arc<dyn TrackLocal + Send + Sync>) -> Result<()>;

    async fn close(&self) -> Result<()>;
}

/// Builds transports for the registry. The seam exists so the negotiation
/// state machine can be exercised without touching the network.
#[async_trait]
pub trait TransportFactory: Send + Sync {
    async fn create(
        &self,
        peer_id: PeerId,
        media: &LocalMedia,
        event_tx: mpsc::Sender<TransportEvent>,
    ) -> Result<Arc<dyn PeerTransport>>;
}
