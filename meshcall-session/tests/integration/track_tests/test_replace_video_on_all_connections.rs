use crate::utils::{init_tracing, test_registry, test_video_track};
use meshcall_core::PeerId;
use meshcall_session::TrackRouter;

#[tokio::test]
async fn every_live_connection_carries_the_new_track() {
    init_tracing();

    let (factory, registry, _transport_rx) = test_registry().await;
    for name in ["alice", "bob", "carol"] {
        registry.get_or_create(&PeerId::from(name)).await.unwrap();
    }

    let router = TrackRouter::new(registry.clone());
    let swapped = router.replace_outbound_video(test_video_track("screen")).await;

    assert_eq!(swapped, 3);
    for name in ["alice", "bob", "carol"] {
        let transport = factory.transport_for(&PeerId::from(name)).unwrap();
        assert_eq!(transport.replaced_tracks(), vec!["screen".to_owned()]);
        assert!(!transport.is_closed(), "a swap never tears a connection down");
    }
}
