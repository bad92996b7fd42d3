mod local_media;
mod track_router;

pub use local_media::{LocalMedia, MediaSource, SyntheticMediaSource};
pub use track_router::TrackRouter;
