use crate::utils::{init_tracing, MockTransport};
use meshcall_core::PeerId;
use meshcall_session::{NegotiationState, PeerConnection};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn offer_is_initiated_only_from_a_fresh_connection() {
    init_tracing();

    let transport = Arc::new(MockTransport::new(PeerId::from("bob")));
    let conn = PeerConnection::new(
        PeerId::from("bob"),
        transport.clone(),
        Duration::from_secs(1),
    );

    let first = conn.initiate_offer().await.unwrap();
    assert!(first.is_some());
    assert_eq!(
        conn.negotiation_state().await,
        NegotiationState::HaveLocalOffer
    );

    // A redelivered peer-joined notification tries again.
    let second = conn.initiate_offer().await.unwrap();
    assert!(second.is_none(), "only one offer per connection");
    assert_eq!(transport.offers_created(), 1);
}
