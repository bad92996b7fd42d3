use crate::utils::{init_tracing, test_registry};
use meshcall_core::PeerId;
use std::sync::Arc;

#[tokio::test]
async fn racing_creates_converge_on_one_connection() {
    init_tracing();

    let (factory, registry, _transport_rx) = test_registry().await;
    let bob = PeerId::from("bob");

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let registry = registry.clone();
        let bob = bob.clone();
        tasks.push(tokio::spawn(async move {
            registry.get_or_create(&bob).await.unwrap()
        }));
    }

    let mut connections = Vec::new();
    for task in tasks {
        connections.push(task.await.unwrap());
    }

    // Every caller got the same winner, whatever the interleaving.
    let winner = &connections[0];
    assert!(connections.iter().all(|c| Arc::ptr_eq(c, winner)));
    assert_eq!(registry.len(), 1);
    assert!(!winner.is_closed().await);

    // Transports built by losing racers were discarded and closed, leaving
    // exactly one open.
    let open = factory
        .transports_for(&bob)
        .iter()
        .filter(|t| !t.is_closed())
        .count();
    assert_eq!(open, 1);
}
