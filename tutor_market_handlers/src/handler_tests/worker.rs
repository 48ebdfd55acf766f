use std::sync::{Arc, Mutex};

use serde_json::json;
use tutor_market_engine::{
    db_types::{PaymentStatus, SettlementRequest},
    test_utils::{init_test_logging, ForcedDecider, MockChannel, MockMarketplaceDb},
    PaymentFlowApi,
    SettlementApi,
};

use crate::{
    events::{LambdaRequest, MessageBatch},
    handlers,
    worker,
};

fn settlement_body(payment_id: i64) -> String {
    json!({
        "id_pagamento": payment_id,
        "id_conexao": 7,
        "valor": 150.0,
        "forma_pagamento": "pix",
        "status_pagamento": "Pending",
    })
    .to_string()
}

#[tokio::test]
async fn a_forced_paid_batch_marks_the_payment_paid() {
    init_test_logging();
    let mut db = MockMarketplaceDb::new();
    db.expect_update_payment_status()
        .withf(|id, status| *id == 41 && *status == PaymentStatus::Paid)
        .times(1)
        .returning(|_, _| Ok(()));
    let api = SettlementApi::new(db, ForcedDecider::paid());
    let outcome = worker::handle_batch(&api, MessageBatch::of_bodies(&[&settlement_body(41)])).await;
    assert_eq!(outcome.updates_executed, 1);
    assert_eq!(outcome.paid, 1);
    assert_eq!(outcome.cancelled, 0);
    assert_eq!(outcome.failure_count(), 0);
}

#[tokio::test]
async fn a_forced_cancelled_batch_marks_the_payment_cancelled() {
    init_test_logging();
    let mut db = MockMarketplaceDb::new();
    db.expect_update_payment_status()
        .withf(|id, status| *id == 41 && *status == PaymentStatus::Cancelled)
        .times(1)
        .returning(|_, _| Ok(()));
    let api = SettlementApi::new(db, ForcedDecider::cancelled());
    let outcome = worker::handle_batch(&api, MessageBatch::of_bodies(&[&settlement_body(41)])).await;
    assert_eq!(outcome.cancelled, 1);
    assert_eq!(outcome.paid, 0);
}

#[tokio::test]
async fn a_redelivered_settlement_request_writes_the_same_terminal_status_again_harmlessly() {
    init_test_logging();
    let mut db = MockMarketplaceDb::new();
    // The second write carries the same value as the first; the update is unconditional and succeeds both times.
    db.expect_update_payment_status()
        .withf(|id, status| *id == 41 && *status == PaymentStatus::Paid)
        .times(2)
        .returning(|_, _| Ok(()));
    let api = SettlementApi::new(db, ForcedDecider::paid());
    let body = settlement_body(41);
    let outcome = worker::handle_batch(&api, MessageBatch::of_bodies(&[&body, &body])).await;
    assert_eq!(outcome.updates_executed, 2);
    assert_eq!(outcome.paid, 2);
    assert_eq!(outcome.failure_count(), 0);
}

#[tokio::test]
async fn an_event_without_records_is_a_successful_no_op() {
    init_test_logging();
    let db = MockMarketplaceDb::new();
    let api = SettlementApi::new(db, ForcedDecider::paid());
    let batch: MessageBatch = serde_json::from_str("{}").unwrap();
    let outcome = worker::handle_batch(&api, batch).await;
    assert_eq!(outcome.updates_executed, 0);
    assert_eq!(outcome.failure_count(), 0);
}

#[tokio::test]
async fn a_malformed_record_does_not_stop_the_rest_of_the_batch() {
    init_test_logging();
    let mut db = MockMarketplaceDb::new();
    db.expect_update_payment_status().times(2).returning(|_, _| Ok(()));
    let api = SettlementApi::new(db, ForcedDecider::paid());
    let bodies = [settlement_body(41), "this is not json".to_string(), settlement_body(42)];
    let refs: Vec<&str> = bodies.iter().map(String::as_str).collect();
    let outcome = worker::handle_batch(&api, MessageBatch::of_bodies(&refs)).await;
    assert_eq!(outcome.updates_executed, 2);
    assert_eq!(outcome.failure_count(), 1);
}

/// Exercises the full flow: the payment handler publishes a settlement request, and the worker consumes that
/// exact message and drives the payment to a terminal state.
#[tokio::test]
async fn a_published_settlement_request_round_trips_through_the_worker() {
    init_test_logging();
    let published = Arc::new(Mutex::new(None));
    let mut db = MockMarketplaceDb::new();
    db.expect_insert_payment().returning(|_| Ok(41));
    let mut channel = MockChannel::new();
    let sink = Arc::clone(&published);
    channel.expect_publish().returning(move |request| {
        *sink.lock().unwrap() = Some(request.clone());
        Ok(())
    });
    let flow = PaymentFlowApi::new(db, channel);
    let request =
        LambdaRequest::with_body(r#"{"id_conexao": 7, "valor": 150.0, "forma_pagamento": "pix"}"#);
    let response = handlers::create_payment(&flow, &request).await;
    assert_eq!(response.status_code, 201);

    let message: SettlementRequest = published.lock().unwrap().take().unwrap();
    let body = serde_json::to_string(&message).unwrap();
    let mut db = MockMarketplaceDb::new();
    db.expect_update_payment_status()
        .withf(|id, status| *id == 41 && status.is_terminal())
        .times(1)
        .returning(|_, _| Ok(()));
    let api = SettlementApi::new(db, ForcedDecider::paid());
    let outcome = worker::handle_batch(&api, MessageBatch::of_bodies(&[&body])).await;
    assert_eq!(outcome.updates_executed, 1);
}
