use crate::utils::{init_tracing, test_registry};
use meshcall_core::PeerId;
use std::sync::Arc;

#[tokio::test]
async fn repeated_lookups_return_the_same_connection() {
    init_tracing();

    let (factory, registry, _transport_rx) = test_registry().await;
    let bob = PeerId::from("bob");

    let first = registry.get_or_create(&bob).await.unwrap();
    let second = registry.get_or_create(&bob).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(factory.created_count(), 1, "no second transport was built");
    assert_eq!(registry.len(), 1);
    assert!(registry.contains(&bob));
}
