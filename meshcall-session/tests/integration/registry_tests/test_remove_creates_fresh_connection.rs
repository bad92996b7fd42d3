use crate::utils::{init_tracing, test_registry};
use meshcall_core::PeerId;
use std::sync::Arc;

#[tokio::test]
async fn remove_closes_and_a_later_create_starts_over() {
    init_tracing();

    let (factory, registry, _transport_rx) = test_registry().await;
    let bob = PeerId::from("bob");

    let first = registry.get_or_create(&bob).await.unwrap();
    registry.remove(&bob).await;

    assert!(registry.is_empty());
    assert!(first.is_closed().await);
    assert!(
        factory.transport_for(&bob).unwrap().is_closed(),
        "removal must tear down the transport"
    );

    // The peer rejoins: brand new connection, brand new transport.
    let second = registry.get_or_create(&bob).await.unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(factory.created_count(), 2);
    assert!(!second.is_closed().await);
}

#[tokio::test]
async fn removing_an_unknown_peer_is_a_no_op() {
    init_tracing();

    let (factory, registry, _transport_rx) = test_registry().await;

    registry.remove(&PeerId::from("stranger")).await;

    assert!(registry.is_empty());
    assert_eq!(factory.created_count(), 0);
}
