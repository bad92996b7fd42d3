use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;
use webrtc::api::media_engine::{MIME_TYPE_OPUS, MIME_TYPE_VP8};
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

/// The local capture tracks shared by every connection in the session.
/// Every outbound sender carries the same underlying track object, so
/// enabling/disabling/replacing affects all peers at once.
#[derive(Clone)]
pub struct LocalMedia {
    pub audio: Arc<dyn TrackLocal + Send + Sync>,
    pub video: Arc<dyn TrackLocal + Send + Sync>,
}

/// The capture device layer. An external collaborator: implementations hand
/// back ready-to-use tracks; this crate never drives capture itself.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Acquire camera + microphone. Failure here is fatal to a room join.
    async fn acquire(&self) -> Result<LocalMedia>;

    /// Acquire a screen-capture video track for sharing.
    async fn acquire_screen(&self) -> Result<Arc<dyn TrackLocal + Send + Sync>>;

    /// Stop all capture. Called once on leave; must be idempotent.
    async fn stop(&self);

    fn set_audio_enabled(&self, enabled: bool);

    fn set_video_enabled(&self, enabled: bool);
}

/// Sample-track media source for clients that feed media programmatically
/// (and for the CLI, which joins rooms without real capture devices).
pub struct SyntheticMediaSource {
    stream_id: String,
    audio_enabled: AtomicBool,
    video_enabled: AtomicBool,
    stopped: AtomicBool,
}

impl SyntheticMediaSource {
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
            audio_enabled: AtomicBool::new(true),
            video_enabled: AtomicBool::new(true),
            stopped: AtomicBool::new(false),
        }
    }

    fn video_track(&self, track_id: &str) -> Arc<TrackLocalStaticSample> {
        Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: MIME_TYPE_VP8.to_owned(),
                ..Default::default()
            },
            track_id.to_owned(),
            self.stream_id.clone(),
        ))
    }
}

#[async_trait]
impl MediaSource for SyntheticMediaSource {
    async fn acquire(&self) -> Result<LocalMedia> {
        let audio = Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: MIME_TYPE_OPUS.to_owned(),
                ..Default::default()
            },
            "audio".to_owned(),
            self.stream_id.clone(),
        ));

        Ok(LocalMedia {
            audio,
            video: self.video_track("video"),
        })
    }

    async fn acquire_screen(&self) -> Result<Arc<dyn TrackLocal + Send + Sync>> {
        Ok(self.video_track("screen"))
    }

    async fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        debug!("synthetic media source stopped");
    }

    fn set_audio_enabled(&self, enabled: bool) {
        self.audio_enabled.store(enabled, Ordering::SeqCst);
    }

    fn set_video_enabled(&self, enabled: bool) {
        self.video_enabled.store(enabled, Ordering::SeqCst);
    }
}
