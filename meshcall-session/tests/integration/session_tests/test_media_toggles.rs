use crate::utils::{init_tracing, spawn_session, wait_until};

#[tokio::test]
async fn audio_and_video_toggles_reach_the_media_source() {
    init_tracing();

    let bob = spawn_session("bob", "room-1").await;
    assert!(bob.media.audio_enabled());
    assert!(bob.media.video_enabled());

    bob.handle.set_audio_enabled(false).await;
    bob.handle.set_video_enabled(false).await;

    let media = bob.media.clone();
    wait_until("both tracks to be disabled", || {
        let media = media.clone();
        async move { !media.audio_enabled() && !media.video_enabled() }
    })
    .await;

    bob.handle.set_video_enabled(true).await;
    let media = bob.media.clone();
    wait_until("the camera to come back", || {
        let media = media.clone();
        async move { media.video_enabled() }
    })
    .await;

    // Toggling the camera leaves the mute state alone.
    assert!(!bob.media.audio_enabled());
}
