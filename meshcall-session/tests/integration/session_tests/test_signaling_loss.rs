use crate::utils::{init_tracing, next_event, spawn_session, wait_until, TestPeer};
use meshcall_session::SessionEvent;

#[tokio::test]
async fn losing_the_signaling_channel_tears_down_without_announcing() {
    init_tracing();

    let TestPeer {
        signaling,
        media,
        mut events,
        signal_tx,
        handle,
        ..
    } = spawn_session("bob", "room-1").await;

    // The relay connection dies.
    drop(signal_tx);

    assert!(matches!(
        next_event(&mut events).await,
        SessionEvent::TransportLost
    ));

    let probe = signaling.clone();
    wait_until("the signaling session to be released", || {
        let signaling = probe.clone();
        async move { signaling.is_closed() }
    })
    .await;

    // No leave goes out over a channel we no longer trust.
    assert!(signaling.leaves().is_empty());
    assert!(media.stopped());
    assert!(handle.registry().is_empty());
}
