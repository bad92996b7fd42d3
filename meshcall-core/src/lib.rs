pub mod model;

pub use model::{
    ClientMessage, IceCandidate, IceServerConfig, PeerId, RoomId, SdpKind, ServerMessage,
    SessionDescription, SignalPayload,
};
