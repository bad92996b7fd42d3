use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::media::LocalMedia;
use crate::peer::connection::PeerConnection;
use crate::transport::{TransportEvent, TransportFactory};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use meshcall_core::PeerId;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Single source of truth for peer → connection. Owns transport creation
/// (through the factory) and teardown; one entry per live peer, never two
/// connections for the same identity.
pub struct PeerRegistry {
    peers: DashMap<PeerId, Arc<PeerConnection>>,
    factory: Arc<dyn TransportFactory>,
    media: LocalMedia,
    transport_tx: mpsc::Sender<TransportEvent>,
    config: SessionConfig,
}

impl PeerRegistry {
    pub fn new(
        factory: Arc<dyn TransportFactory>,
        media: LocalMedia,
        transport_tx: mpsc::Sender<TransportEvent>,
        config: SessionConfig,
    ) -> Self {
        Self {
            peers: DashMap::new(),
            factory,
            media,
            transport_tx,
            config,
        }
    }

    pub fn get(&self, peer_id: &PeerId) -> Option<Arc<PeerConnection>> {
        self.peers.get(peer_id).map(|entry| entry.clone())
    }

    pub fn contains(&self, peer_id: &PeerId) -> bool {
        self.peers.contains_key(peer_id)
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Returns the existing connection for `peer_id` or builds a new one
    /// bound to the shared local tracks. Idempotent; when two callers race,
    /// the loser's freshly built transport is discarded, keeping the
    /// at-most-one-per-identity invariant.
    pub async fn get_or_create(
        &self,
        peer_id: &PeerId,
    ) -> Result<Arc<PeerConnection>, SessionError> {
        if let Some(existing) = self.get(peer_id) {
            return Ok(existing);
        }

        info!("creating connection for peer {peer_id}");
        let transport = self
            .factory
            .create(peer_id.clone(), &self.media, self.transport_tx.clone())
            .await
            .map_err(|e| SessionError::TransportSetup(peer_id.clone(), e))?;
        let conn = Arc::new(PeerConnection::new(
            peer_id.clone(),
            transport,
            self.config.negotiation_timeout,
        ));

        let (winner, loser) = match self.peers.entry(peer_id.clone()) {
            Entry::Occupied(existing) => (existing.get().clone(), Some(conn)),
            Entry::Vacant(slot) => {
                slot.insert(conn.clone());
                (conn, None)
            }
        };

        if let Some(stale) = loser {
            debug!("lost creation race for {peer_id}, discarding transport");
            stale.close().await;
        }

        Ok(winner)
    }

    /// Close and forget a peer. No-op for unknown ids.
    pub async fn remove(&self, peer_id: &PeerId) {
        let Some((_, conn)) = self.peers.remove(peer_id) else {
            debug!("remove for unknown peer {peer_id}, ignoring");
            return;
        };

        info!("closing connection for peer {peer_id}");
        conn.close().await;
    }

    /// Snapshot of the live connections. Safe against concurrent removal:
    /// callers see the set as of the call, removed entries are simply closed
    /// connections they skip.
    pub fn connections(&self) -> Vec<Arc<PeerConnection>> {
        self.peers.iter().map(|entry| entry.value().clone()).collect()
    }

    pub async fn close_all(&self) {
        let ids: Vec<PeerId> = self.peers.iter().map(|e| e.key().clone()).collect();
        for peer_id in ids {
            self.remove(&peer_id).await;
        }
    }
}
