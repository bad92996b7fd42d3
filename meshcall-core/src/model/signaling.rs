use crate::model::peer::PeerId;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdpKind {
    Offer,
    Answer,
}

/// One half of an offer/answer exchange, as produced by the underlying
/// transport and relayed verbatim over signaling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescription {
    #[serde(rename = "type")]
    pub kind: SdpKind,
    pub sdp: String,
}

/// A single discovered network path. Field casing matches what browser peers
/// put on the wire (`sdpMid`, `sdpMLineIndex`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidate {
    pub candidate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp_mid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp_m_line_index: Option<u16>,
}

/// Negotiation payload carried inside a `signal` envelope: either a session
/// description or a single ICE candidate, distinguished by field presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalPayload {
    Sdp { sdp: SessionDescription },
    Candidate { candidate: IceCandidate },
}

/// Messages this client sends to the signaling relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ClientMessage {
    Join {
        room_id: RoomId,
    },
    Leave {
        room_id: RoomId,
    },
    Signal {
        target: PeerId,
        signal: SignalPayload,
    },
}

/// Messages the signaling relay delivers to this client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ServerMessage {
    PeerJoined {
        peer_id: PeerId,
    },
    Signal {
        from: PeerId,
        signal: SignalPayload,
    },
    PeerLeft {
        peer_id: PeerId,
    },
}
