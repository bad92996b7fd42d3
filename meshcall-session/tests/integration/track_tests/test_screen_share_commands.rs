use crate::utils::{init_tracing, next_event, spawn_session, wait_until};
use meshcall_core::{PeerId, ServerMessage};
use meshcall_session::SessionEvent;

#[tokio::test]
async fn screen_share_swaps_out_and_back_without_renegotiating() {
    init_tracing();

    let mut bob = spawn_session("bob", "room-1").await;
    let alice = PeerId::from("alice");

    bob.signal_tx
        .send(ServerMessage::PeerJoined {
            peer_id: alice.clone(),
        })
        .await
        .unwrap();
    assert!(matches!(
        next_event(&mut bob.events).await,
        SessionEvent::PeerJoined { .. }
    ));

    bob.handle.start_screen_share().await;
    assert!(matches!(
        next_event(&mut bob.events).await,
        SessionEvent::ScreenShareStarted
    ));

    let transport = bob.factory.transport_for(&alice).unwrap();
    assert_eq!(transport.replaced_tracks(), vec!["screen".to_owned()]);
    let offers_before = transport.offers_created();

    bob.handle.stop_screen_share().await;
    assert!(matches!(
        next_event(&mut bob.events).await,
        SessionEvent::ScreenShareStopped
    ));
    assert_eq!(
        transport.replaced_tracks(),
        vec!["screen".to_owned(), "video".to_owned()],
        "stopping restores the camera track"
    );

    // Track swaps ride the existing negotiation, no new offers.
    assert_eq!(transport.offers_created(), offers_before);

    // A stop with no active share is ignored. The audio toggle behind it
    // acts as a fence proving the loop processed both commands.
    bob.handle.stop_screen_share().await;
    bob.handle.set_audio_enabled(false).await;
    let media = bob.media.clone();
    wait_until("the command queue to drain", || {
        let media = media.clone();
        async move { !media.audio_enabled() }
    })
    .await;
    assert_eq!(transport.replaced_tracks().len(), 2);
}
