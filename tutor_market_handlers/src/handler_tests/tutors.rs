use tm_common::Money;
use tutor_market_engine::{
    db_types::TutorListing,
    test_utils::{init_test_logging, MockMarketplaceDb},
    StorageError,
};

use crate::{events::LambdaRequest, handlers};

fn listings() -> Vec<TutorListing> {
    vec![
        TutorListing {
            tutor_id: 1,
            name: "Ana".into(),
            hourly_rate: Money::try_from(75.0).unwrap(),
            subject: "Matemática".into(),
        },
        TutorListing {
            tutor_id: 2,
            name: "Bruno".into(),
            hourly_rate: Money::try_from(60.5).unwrap(),
            subject: "Física".into(),
        },
    ]
}

#[tokio::test]
async fn an_unfiltered_search_returns_every_tutor_subject_pair() {
    init_test_logging();
    let mut db = MockMarketplaceDb::new();
    db.expect_search_tutors().withf(|subject| subject.is_none()).returning(|_| Ok(listings()));
    let response = handlers::search_tutors(&db, &LambdaRequest::default()).await;
    assert_eq!(response.status_code, 200);
    let body = response.body_json();
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["id_professor"], 1);
    assert_eq!(body[0]["valor_hora"], 75.0);
    assert_eq!(body[1]["nome_materia"], "Física");
}

#[tokio::test]
async fn a_subject_filter_is_passed_through_to_the_query() {
    init_test_logging();
    let mut db = MockMarketplaceDb::new();
    db.expect_search_tutors()
        .withf(|subject| subject.as_deref() == Some("Matemática"))
        .returning(|_| Ok(listings().into_iter().take(1).collect()));
    let request = LambdaRequest::with_query(&[("materia", "Matemática")]);
    let response = handlers::search_tutors(&db, &request).await;
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body_json().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn a_blank_subject_filter_behaves_like_no_filter_at_all() {
    init_test_logging();
    let mut db = MockMarketplaceDb::new();
    db.expect_search_tutors().withf(|subject| subject.is_none()).times(2).returning(|_| Ok(listings()));
    for blank in ["", "   "] {
        let request = LambdaRequest::with_query(&[("materia", blank)]);
        let response = handlers::search_tutors(&db, &request).await;
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body_json().as_array().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn preflight_requests_short_circuit_without_touching_storage() {
    init_test_logging();
    let db = MockMarketplaceDb::new();
    let response = handlers::search_tutors(&db, &LambdaRequest::preflight()).await;
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body_json()["message"], "CORS OK!");
}

#[tokio::test]
async fn a_failing_query_surfaces_as_a_500_with_diagnostics() {
    init_test_logging();
    let mut db = MockMarketplaceDb::new();
    db.expect_search_tutors()
        .returning(|_| Err(StorageError::Connection("Timed out waiting for a database connection".into())));
    let response = handlers::search_tutors(&db, &LambdaRequest::default()).await;
    assert_eq!(response.status_code, 500);
    assert!(response.body_json()["error"].as_str().unwrap().contains("Timed out"));
}
