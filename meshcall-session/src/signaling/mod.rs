mod signaling_output;
mod ws_client;

pub use signaling_output::SignalingOutput;
pub use ws_client::WsSignaling;
