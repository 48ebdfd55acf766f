use std::sync::{Arc, Mutex};

use tm_common::Money;
use tutor_market_engine::{
    db_types::{PaymentStatus, PaymentSummary},
    test_utils::{init_test_logging, MockChannel, MockMarketplaceDb},
    ChannelError,
    PaymentFlowApi,
};

use crate::{events::LambdaRequest, handlers};

const PAYMENT_BODY: &str = r#"{"id_conexao": 7, "valor": 150.0, "forma_pagamento": "pix"}"#;

#[tokio::test]
async fn a_payment_is_recorded_and_queued() {
    init_test_logging();
    let mut db = MockMarketplaceDb::new();
    db.expect_insert_payment()
        .withf(|p| {
            p.engagement_id == 7 && p.amount == Money::try_from(150.0).unwrap() && p.method == "pix"
        })
        .times(1)
        .returning(|_| Ok(41));
    let mut channel = MockChannel::new();
    channel
        .expect_publish()
        .withf(|r| r.payment_id == 41 && r.engagement_id == 7 && r.status == PaymentStatus::Pending)
        .times(1)
        .returning(|_| Ok(()));
    let api = PaymentFlowApi::new(db, channel);
    let response = handlers::create_payment(&api, &LambdaRequest::with_body(PAYMENT_BODY)).await;
    assert_eq!(response.status_code, 201);
    assert_eq!(response.body_json()["id_pagamento"], 41);
}

#[tokio::test]
async fn the_row_is_committed_before_the_settlement_request_is_published() {
    init_test_logging();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut db = MockMarketplaceDb::new();
    let log = Arc::clone(&calls);
    db.expect_insert_payment().returning(move |_| {
        log.lock().unwrap().push("insert");
        Ok(41)
    });
    let mut channel = MockChannel::new();
    let log = Arc::clone(&calls);
    channel.expect_publish().returning(move |_| {
        log.lock().unwrap().push("publish");
        Ok(())
    });
    let api = PaymentFlowApi::new(db, channel);
    let response = handlers::create_payment(&api, &LambdaRequest::with_body(PAYMENT_BODY)).await;
    assert_eq!(response.status_code, 201);
    assert_eq!(*calls.lock().unwrap(), vec!["insert", "publish"]);
}

#[tokio::test]
async fn missing_payment_fields_are_rejected_before_any_insert() {
    init_test_logging();
    for (body, field) in [
        (r#"{"valor": 150.0, "forma_pagamento": "pix"}"#, "id_conexao"),
        (r#"{"id_conexao": 7, "forma_pagamento": "pix"}"#, "valor"),
        (r#"{"id_conexao": 7, "valor": 150.0}"#, "forma_pagamento"),
    ] {
        let api = PaymentFlowApi::new(MockMarketplaceDb::new(), MockChannel::new());
        let response = handlers::create_payment(&api, &LambdaRequest::with_body(body)).await;
        assert_eq!(response.status_code, 400, "body was accepted: {body}");
        assert!(response.body_json()["error"].as_str().unwrap().contains(field));
    }
}

#[tokio::test]
async fn a_publish_failure_surfaces_as_a_500_after_the_row_is_committed() {
    init_test_logging();
    let mut db = MockMarketplaceDb::new();
    db.expect_insert_payment().times(1).returning(|_| Ok(41));
    let mut channel = MockChannel::new();
    channel.expect_publish().returning(|_| Err(ChannelError::Publish("queue unavailable".into())));
    let api = PaymentFlowApi::new(db, channel);
    let response = handlers::create_payment(&api, &LambdaRequest::with_body(PAYMENT_BODY)).await;
    assert_eq!(response.status_code, 500);
    assert!(response.body_json()["error"].as_str().unwrap().contains("41"));
}

#[tokio::test]
async fn the_student_query_parameter_is_required_for_listing() {
    init_test_logging();
    let db = MockMarketplaceDb::new();
    let response = handlers::payments_by_student(&db, &LambdaRequest::default()).await;
    assert_eq!(response.status_code, 400);
    assert!(response.body_json()["error"].as_str().unwrap().contains("id_aluno"));
}

#[tokio::test]
async fn a_student_with_no_payments_gets_an_empty_list() {
    init_test_logging();
    let mut db = MockMarketplaceDb::new();
    db.expect_payments_for_student().withf(|id| *id == 3).returning(|_| Ok(vec![]));
    let request = LambdaRequest::with_query(&[("id_aluno", "3")]);
    let response = handlers::payments_by_student(&db, &request).await;
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "[]");
}

#[tokio::test]
async fn payment_listings_serialize_amounts_as_numbers() {
    init_test_logging();
    let mut db = MockMarketplaceDb::new();
    db.expect_payments_for_student().returning(|_| {
        Ok(vec![PaymentSummary {
            payment_id: 41,
            engagement_id: 7,
            amount: Money::try_from(150.0).unwrap(),
            method: "pix".into(),
            status: PaymentStatus::Paid,
        }])
    });
    let request = LambdaRequest::with_query(&[("id_aluno", "3")]);
    let response = handlers::payments_by_student(&db, &request).await;
    let body = response.body_json();
    assert_eq!(body[0]["id_pagamento"], 41);
    assert!(body[0]["valor"].is_number());
    assert_eq!(body[0]["valor"], 150.0);
    assert_eq!(body[0]["status"], "Paid");
}
