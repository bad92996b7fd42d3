use crate::error::SessionError;
use crate::peer::candidate_queue::CandidateQueue;
use crate::transport::PeerTransport;
use meshcall_core::{IceCandidate, PeerId, SessionDescription};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use webrtc::track::track_local::TrackLocal;

/// Where a connection stands in the offer/answer exchange. Transitions move
/// forward only, except the return to `Stable` that closes each completed
/// round-trip; `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationState {
    New,
    HaveLocalOffer,
    HaveRemoteOffer,
    Stable,
    Closed,
}

struct NegotiationInner {
    phase: NegotiationState,
    remote_description_applied: bool,
    applied_remote_sdp: Option<String>,
    pending_candidates: CandidateQueue,
}

/// One peer's media connection plus its negotiation bookkeeping.
///
/// All negotiation steps take the inner mutex for their whole duration, so a
/// suspended step can never interleave with another step for the same peer.
pub struct PeerConnection {
    peer_id: PeerId,
    transport: Arc<dyn PeerTransport>,
    step_timeout: Duration,
    inner: Mutex<NegotiationInner>,
}

impl PeerConnection {
    pub fn new(
        peer_id: PeerId,
        transport: Arc<dyn PeerTransport>,
        step_timeout: Duration,
    ) -> Self {
        Self {
            peer_id,
            transport,
            step_timeout,
            inner: Mutex::new(NegotiationInner {
                phase: NegotiationState::New,
                remote_description_applied: false,
                applied_remote_sdp: None,
                pending_candidates: CandidateQueue::default(),
            }),
        }
    }

    pub fn peer_id(&self) -> &PeerId {
        &self.peer_id
    }

    pub async fn negotiation_state(&self) -> NegotiationState {
        self.inner.lock().await.phase
    }

    pub async fn remote_description_applied(&self) -> bool {
        self.inner.lock().await.remote_description_applied
    }

    pub async fn queued_candidates(&self) -> usize {
        self.inner.lock().await.pending_candidates.len()
    }

    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.phase == NegotiationState::Closed
    }

    /// Originate the offer for a freshly joined peer. Only fires from `New`:
    /// a retried peer-joined delivery (at-least-once signaling) must not send
    /// a second offer.
    pub async fn initiate_offer(&self) -> Result<Option<SessionDescription>, SessionError> {
        let mut inner = self.inner.lock().await;
        if inner.phase != NegotiationState::New {
            debug!(
                "not initiating offer for {} in state {:?}",
                self.peer_id, inner.phase
            );
            return Ok(None);
        }

        let offer = self.step(self.transport.create_offer()).await?;
        inner.phase = NegotiationState::HaveLocalOffer;
        Ok(Some(offer))
    }

    /// Apply a remote offer and produce the answer to send back.
    ///
    /// Returns `None` when the offer is a replay of the description already
    /// applied in `Stable` state: answering it again would start a
    /// renegotiation storm from duplicate/retried signaling deliveries.
    pub async fn apply_remote_offer(
        &self,
        desc: SessionDescription,
    ) -> Result<Option<SessionDescription>, SessionError> {
        let mut inner = self.inner.lock().await;
        if inner.phase == NegotiationState::Closed {
            debug!("ignoring offer for closed connection {}", self.peer_id);
            return Ok(None);
        }
        if inner.phase == NegotiationState::Stable
            && inner.applied_remote_sdp.as_deref() == Some(desc.sdp.as_str())
        {
            debug!("duplicate offer from {} while stable, skipping", self.peer_id);
            return Ok(None);
        }

        self.step(self.transport.set_remote_description(desc.clone()))
            .await?;
        inner.phase = NegotiationState::HaveRemoteOffer;
        inner.remote_description_applied = true;
        inner.applied_remote_sdp = Some(desc.sdp);
        self.flush_pending(&mut inner).await;

        let answer = self.step(self.transport.create_answer()).await?;
        inner.phase = NegotiationState::Stable;
        Ok(Some(answer))
    }

    /// Apply a remote answer to our outstanding offer.
    pub async fn apply_remote_answer(
        &self,
        desc: SessionDescription,
    ) -> Result<(), SessionError> {
        let mut inner = self.inner.lock().await;
        if inner.phase != NegotiationState::HaveLocalOffer {
            debug!(
                "stale answer from {} in state {:?}, skipping",
                self.peer_id, inner.phase
            );
            return Ok(());
        }

        self.step(self.transport.set_remote_description(desc.clone()))
            .await?;
        inner.remote_description_applied = true;
        inner.applied_remote_sdp = Some(desc.sdp);
        self.flush_pending(&mut inner).await;
        inner.phase = NegotiationState::Stable;
        Ok(())
    }

    /// Apply a remote candidate immediately once a remote description is in
    /// place, otherwise queue it. A rejected candidate is logged and the
    /// connection keeps operating.
    pub async fn add_remote_candidate(&self, candidate: IceCandidate) {
        let mut inner = self.inner.lock().await;
        if inner.phase == NegotiationState::Closed {
            debug!("dropping candidate for closed connection {}", self.peer_id);
            return;
        }

        if inner.remote_description_applied {
            if let Err(e) = self.transport.add_ice_candidate(candidate).await {
                warn!("failed to add candidate for {}: {e:#}", self.peer_id);
            }
        } else {
            inner.pending_candidates.push(candidate);
            debug!(
                "queued candidate for {} ({} pending)",
                self.peer_id,
                inner.pending_candidates.len()
            );
        }
    }

    /// Swap the outbound video track, skipping connections mid-teardown.
    /// Returns whether the swap was attempted and succeeded.
    pub async fn replace_outbound_video(
        &self,
        track: Arc<dyn TrackLocal + Send + Sync>,
    ) -> Result<bool, SessionError> {
        if self.is_closed().await {
            debug!("not swapping track on closed connection {}", self.peer_id);
            return Ok(false);
        }

        self.transport
            .replace_video_track(track)
            .await
            .map_err(|e| SessionError::Negotiation(self.peer_id.clone(), e))?;
        Ok(true)
    }

    /// Tear down the connection. Terminal; further operations become no-ops.
    pub async fn close(&self) {
        let mut inner = self.inner.lock().await;
        if inner.phase == NegotiationState::Closed {
            return;
        }
        inner.phase = NegotiationState::Closed;
        inner.pending_candidates.clear();

        if let Err(e) = self.transport.close().await {
            warn!("error closing transport for {}: {e:#}", self.peer_id);
        }
    }

    async fn flush_pending(&self, inner: &mut NegotiationInner) {
        if inner.pending_candidates.is_empty() {
            return;
        }

        let pending = inner.pending_candidates.drain();
        debug!(
            "flushing {} queued candidates for {}",
            pending.len(),
            self.peer_id
        );
        for candidate in pending {
            if let Err(e) = self.transport.add_ice_candidate(candidate).await {
                warn!("failed to apply queued candidate for {}: {e:#}", self.peer_id);
            }
        }
    }

    async fn step<T>(
        &self,
        fut: impl Future<Output = anyhow::Result<T>>,
    ) -> Result<T, SessionError> {
        match tokio::time::timeout(self.step_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(SessionError::Negotiation(self.peer_id.clone(), e)),
            Err(_) => Err(SessionError::NegotiationTimeout(self.peer_id.clone())),
        }
    }
}
