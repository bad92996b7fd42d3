use crate::utils::{init_tracing, next_event, offer, spawn_session, wait_until};
use meshcall_core::{PeerId, ServerMessage, SignalPayload};
use meshcall_session::SessionEvent;

#[tokio::test]
async fn signal_after_peer_left_builds_a_fresh_connection() {
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
    let first_transport = bob.factory.transport_for(&alice).unwrap();

    bob.signal_tx
        .send(ServerMessage::PeerLeft {
            peer_id: alice.clone(),
        })
        .await
        .unwrap();
    assert!(matches!(
        next_event(&mut bob.events).await,
        SessionEvent::PeerLeft { .. }
    ));
    assert!(bob.handle.registry().is_empty());
    assert!(first_transport.is_closed());

    // Alice comes back; her first signal recreates state from scratch.
    bob.signal_tx
        .send(ServerMessage::Signal {
            from: alice.clone(),
            signal: SignalPayload::Sdp {
                sdp: offer("v=0 rejoin"),
            },
        })
        .await
        .unwrap();
    assert!(matches!(
        next_event(&mut bob.events).await,
        SessionEvent::PeerJoined { .. }
    ));

    let registry = bob.handle.registry().clone();
    let alice_probe = alice.clone();
    wait_until("the rejoined peer to be registered", || {
        let registry = registry.clone();
        let alice = alice_probe.clone();
        async move { registry.contains(&alice) }
    })
    .await;

    assert_eq!(bob.factory.created_count(), 2);
    let second_transport = bob.factory.transport_for(&alice).unwrap();
    assert!(!second_transport.is_closed());
}
