mod candidate_queue;
mod connection;
mod registry;

pub use candidate_queue::CandidateQueue;
pub use connection::{NegotiationState, PeerConnection};
pub use registry::PeerRegistry;
