use tutor_market_engine::{
    test_utils::{init_test_logging, MockMarketplaceDb},
    StorageError,
};

use crate::{events::LambdaRequest, handlers};

#[tokio::test]
async fn registration_with_both_fields_returns_201() {
    init_test_logging();
    let mut db = MockMarketplaceDb::new();
    db.expect_insert_student()
        .withf(|s| s.name == "Maria Souza" && s.national_id == "12345678901")
        .times(1)
        .returning(|_| Ok(1));
    let request = LambdaRequest::with_body(r#"{"nome": "Maria Souza", "cpf": "12345678901"}"#);
    let response = handlers::register_student(&db, &request).await;
    assert_eq!(response.status_code, 201);
    assert_eq!(response.body_json()["message"], "Student registered successfully");
}

#[tokio::test]
async fn registration_without_cpf_is_rejected_before_any_insert() {
    init_test_logging();
    // No expectation is set, so an insert call would panic the test.
    let db = MockMarketplaceDb::new();
    let request = LambdaRequest::with_body(r#"{"nome": "Maria Souza"}"#);
    let response = handlers::register_student(&db, &request).await;
    assert_eq!(response.status_code, 400);
    assert!(response.body_json()["error"].as_str().unwrap().contains("cpf"));
}

#[tokio::test]
async fn registration_without_nome_is_rejected_before_any_insert() {
    init_test_logging();
    let db = MockMarketplaceDb::new();
    let request = LambdaRequest::with_body(r#"{"cpf": "12345678901"}"#);
    let response = handlers::register_student(&db, &request).await;
    assert_eq!(response.status_code, 400);
    assert!(response.body_json()["error"].as_str().unwrap().contains("nome"));
}

#[tokio::test]
async fn a_duplicate_national_id_surfaces_as_a_500() {
    init_test_logging();
    let mut db = MockMarketplaceDb::new();
    db.expect_insert_student()
        .returning(|_| Err(StorageError::UniqueViolation("students.national_id".into())));
    let request = LambdaRequest::with_body(r#"{"nome": "Maria Souza", "cpf": "12345678901"}"#);
    let response = handlers::register_student(&db, &request).await;
    assert_eq!(response.status_code, 500);
}

#[tokio::test]
async fn an_update_without_cpf_is_rejected() {
    init_test_logging();
    let db = MockMarketplaceDb::new();
    let request = LambdaRequest::with_body(r#"{"nome": "Novo Nome"}"#);
    let response = handlers::update_student(&db, &request).await;
    assert_eq!(response.status_code, 400);
    assert!(response.body_json()["error"].as_str().unwrap().contains("cpf"));
}

#[tokio::test]
async fn an_update_with_no_updatable_field_is_rejected_without_an_existence_check() {
    init_test_logging();
    // Neither student_exists nor update_student may be called.
    let db = MockMarketplaceDb::new();
    let request = LambdaRequest::with_body(r#"{"cpf": "12345678901"}"#);
    let response = handlers::update_student(&db, &request).await;
    assert_eq!(response.status_code, 400);
    assert!(response.body_json()["error"].as_str().unwrap().contains("updatable"));
}

#[tokio::test]
async fn updating_an_unknown_student_returns_404_and_writes_nothing() {
    init_test_logging();
    let mut db = MockMarketplaceDb::new();
    db.expect_student_exists().withf(|id| id == "99999999999").returning(|_| Ok(false));
    let request = LambdaRequest::with_body(r#"{"cpf": "99999999999", "nome": "Novo Nome"}"#);
    let response = handlers::update_student(&db, &request).await;
    assert_eq!(response.status_code, 404);
}

#[tokio::test]
async fn a_valid_update_writes_the_supplied_fields() {
    init_test_logging();
    let mut db = MockMarketplaceDb::new();
    db.expect_student_exists().returning(|_| Ok(true));
    db.expect_update_student()
        .withf(|u| u.national_id == "12345678901" && u.name.as_deref() == Some("Novo Nome"))
        .times(1)
        .returning(|_| Ok(()));
    let request = LambdaRequest::with_body(r#"{"cpf": "12345678901", "nome": "Novo Nome"}"#);
    let response = handlers::update_student(&db, &request).await;
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body_json()["message"], "Student record updated successfully");
}
