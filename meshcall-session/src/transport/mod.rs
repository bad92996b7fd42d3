mod peer_transport;
mod rtc_transport;
mod transport_config;

pub use peer_transport::{PeerTransport, TransportEvent, TransportFactory};
pub use rtc_transport::{RtcPeerTransport, RtcTransportFactory};
pub use transport_config::TransportConfig;
