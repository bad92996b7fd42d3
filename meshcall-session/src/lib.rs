pub mod config;
pub mod error;
pub mod media;
pub mod peer;
pub mod session;
pub mod signaling;
pub mod transport;

pub use config::SessionConfig;
pub use error::SessionError;
pub use media::{LocalMedia, MediaSource, SyntheticMediaSource, TrackRouter};
pub use peer::{NegotiationState, PeerConnection, PeerRegistry};
pub use session::{RoomSession, SessionCommand, SessionEvent, SessionHandle};
pub use signaling::{SignalingOutput, WsSignaling};
pub use transport::{
    PeerTransport, RtcTransportFactory, TransportConfig, TransportEvent, TransportFactory,
};
