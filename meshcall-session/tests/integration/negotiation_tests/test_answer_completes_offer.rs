use crate::utils::{answer, candidate, init_tracing, MockTransport};
use meshcall_core::PeerId;
use meshcall_session::{NegotiationState, PeerConnection};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn remote_answer_completes_the_exchange_and_flushes_candidates() {
    init_tracing();

    let transport = Arc::new(MockTransport::new(PeerId::from("bob")));
    let conn = PeerConnection::new(
        PeerId::from("bob"),
        transport.clone(),
        Duration::from_secs(1),
    );

    conn.initiate_offer().await.unwrap();
    for n in 0..3 {
        conn.add_remote_candidate(candidate(&format!("waiting-{n}"))).await;
    }
    assert_eq!(conn.queued_candidates().await, 3);

    conn.apply_remote_answer(answer("v=0 remote-answer"))
        .await
        .unwrap();

    assert_eq!(conn.negotiation_state().await, NegotiationState::Stable);
    assert!(conn.remote_description_applied().await);
    assert_eq!(
        transport.applied_candidates(),
        vec![
            "candidate:waiting-0".to_owned(),
            "candidate:waiting-1".to_owned(),
            "candidate:waiting-2".to_owned(),
        ]
    );
    assert_eq!(conn.queued_candidates().await, 0);
}
