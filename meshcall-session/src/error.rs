use meshcall_core::PeerId;
use thiserror::Error;

/// Failures surfaced by the session layer.
///
/// Only media acquisition at join time and signaling loss are user-visible
/// failures; everything scoped to a single peer or a single candidate is
/// recovered locally and logged.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to acquire local media: {0}")]
    MediaAcquisition(#[source] anyhow::Error),

    #[error("signaling transport failed: {0}")]
    Signaling(#[source] anyhow::Error),

    #[error("failed to create peer transport for {0}: {1}")]
    TransportSetup(PeerId, #[source] anyhow::Error),

    #[error("negotiation step for peer {0} timed out")]
    NegotiationTimeout(PeerId),

    #[error("negotiation step for peer {0} failed: {1}")]
    Negotiation(PeerId, #[source] anyhow::Error),
}
