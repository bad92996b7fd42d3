use meshcall_core::PeerId;
use std::fmt;
use std::sync::Arc;
use webrtc::track::track_remote::TrackRemote;

/// Events the session loop reports to its owner.
pub enum SessionEvent {
    /// A connection now exists for this peer (seen via join or first signal).
    PeerJoined { peer_id: PeerId },

    /// The peer's connection was closed and removed.
    PeerLeft { peer_id: PeerId },

    /// Inbound media arrived on a peer's connection.
    RemoteTrack {
        peer_id: PeerId,
        track: Arc<TrackRemote>,
    },

    ScreenShareStarted,

    ScreenShareStopped,

    /// The signaling channel dropped; the session has torn itself down.
    TransportLost,
}

impl fmt::Debug for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PeerJoined { peer_id } => {
                f.debug_struct("PeerJoined").field("peer_id", peer_id).finish()
            }
            Self::PeerLeft { peer_id } => {
                f.debug_struct("PeerLeft").field("peer_id", peer_id).finish()
            }
            Self::RemoteTrack { peer_id, track } => f
                .debug_struct("RemoteTrack")
                .field("peer_id", peer_id)
                .field("track_id", &track.id())
                .finish(),
            Self::ScreenShareStarted => write!(f, "ScreenShareStarted"),
            Self::ScreenShareStopped => write!(f, "ScreenShareStopped"),
            Self::TransportLost => write!(f, "TransportLost"),
        }
    }
}
