use crate::peer::PeerRegistry;
use std::sync::Arc;
use tracing::{info, warn};
use webrtc::track::track_local::TrackLocal;

/// Redirects the outbound video of every live connection at once, used for
/// screen-share start/stop. A same-kind track swap needs no renegotiation,
/// so the router mutates the active senders directly.
pub struct TrackRouter {
    registry: Arc<PeerRegistry>,
}

impl TrackRouter {
    pub fn new(registry: Arc<PeerRegistry>) -> Self {
        Self { registry }
    }

    /// Swap every live connection's outbound video to `track`. Per-connection
    /// atomic: a failed swap leaves that connection untouched and the rest
    /// are still attempted. Returns how many connections now carry the track.
    pub async fn replace_outbound_video(
        &self,
        track: Arc<dyn TrackLocal + Send + Sync>,
    ) -> usize {
        let mut swapped = 0;
        for conn in self.registry.connections() {
            match conn.replace_outbound_video(track.clone()).await {
                Ok(true) => swapped += 1,
                Ok(false) => {}
                Err(e) => warn!("track swap failed for {}: {e}", conn.peer_id()),
            }
        }

        info!("outbound video rerouted on {swapped} connections");
        swapped
    }

    /// Swap back to the camera track after a screen share ends.
    pub async fn revert_to_camera(&self, camera: Arc<dyn TrackLocal + Send + Sync>) -> usize {
        self.replace_outbound_video(camera).await
    }
}
