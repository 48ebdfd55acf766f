//! Request handler definitions.
//!
//! Every handler follows the same shape: short-circuit pre-flight requests, validate the input, run the
//! storage operation through the injected backend, and convert the result (or any failure) into the uniform
//! response envelope. Handlers are generic over the engine's trait seams so tests can inject mocks.
use log::*;
use serde_json::json;
use tutor_market_engine::{
    db_types::{NewEngagement, NewPayment, NewStudent, StudentUpdate},
    MarketplaceDatabase,
    MessageChannel,
    PaymentFlowApi,
};

use crate::{
    data_objects::{
        require_positive_int,
        require_string,
        CreateEngagementBody,
        CreatePaymentBody,
        RegisterStudentBody,
        UpdateStudentBody,
    },
    errors::HandlerError,
    events::{LambdaRequest, LambdaResponse},
};

/// Fetches tutor/subject pairs, optionally filtered by the `materia` query parameter.
pub async fn search_tutors<B: MarketplaceDatabase>(db: &B, req: &LambdaRequest) -> LambdaResponse {
    if req.is_preflight() {
        return LambdaResponse::preflight();
    }
    try_search_tutors(db, req).await.unwrap_or_else(LambdaResponse::from)
}

async fn try_search_tutors<B: MarketplaceDatabase>(
    db: &B,
    req: &LambdaRequest,
) -> Result<LambdaResponse, HandlerError> {
    // A blank filter means "no filter", the same as an absent parameter.
    let subject = req.query_param("materia").filter(|s| !s.trim().is_empty()).map(String::from);
    debug!("🔍️ Searching tutors, subject filter: {subject:?}");
    let listings = db.search_tutors(subject).await?;
    LambdaResponse::json(200, &listings)
}

/// Registers a new student. `nome` and `cpf` are both required.
///
/// No duplicate check happens here; a national-id collision surfaces from the storage layer as a 500.
pub async fn register_student<B: MarketplaceDatabase>(db: &B, req: &LambdaRequest) -> LambdaResponse {
    if req.is_preflight() {
        return LambdaResponse::preflight();
    }
    try_register_student(db, req).await.unwrap_or_else(LambdaResponse::from)
}

async fn try_register_student<B: MarketplaceDatabase>(
    db: &B,
    req: &LambdaRequest,
) -> Result<LambdaResponse, HandlerError> {
    let body: RegisterStudentBody = req.json_body()?;
    let name = require_string("nome", body.name)?;
    let national_id = require_string("cpf", body.national_id)?;
    db.insert_student(NewStudent::new(name, national_id)).await?;
    info!("🧑‍🎓️ Student registered");
    Ok(LambdaResponse::message(201, "Student registered successfully"))
}

/// Updates an existing student, keyed by `cpf`. Only the supplied fields are written.
///
/// Supplying no updatable field at all is a validation error rather than an empty UPDATE statement.
pub async fn update_student<B: MarketplaceDatabase>(db: &B, req: &LambdaRequest) -> LambdaResponse {
    if req.is_preflight() {
        return LambdaResponse::preflight();
    }
    try_update_student(db, req).await.unwrap_or_else(LambdaResponse::from)
}

async fn try_update_student<B: MarketplaceDatabase>(
    db: &B,
    req: &LambdaRequest,
) -> Result<LambdaResponse, HandlerError> {
    let body: UpdateStudentBody = req.json_body()?;
    let national_id = require_string("cpf", body.national_id)?;
    let mut update = StudentUpdate::new(national_id);
    if let Some(name) = body.name.filter(|n| !n.trim().is_empty()) {
        update = update.with_name(name);
    }
    if !update.has_changes() {
        return Err(HandlerError::Validation("At least one updatable field must be supplied".into()));
    }
    if !db.student_exists(&update.national_id).await? {
        return Err(HandlerError::NotFound("No student matches the given national id".into()));
    }
    db.update_student(update).await?;
    Ok(LambdaResponse::message(200, "Student record updated successfully"))
}

/// Creates a student–tutor engagement. All four fields are required and must coerce to positive integers.
pub async fn create_engagement<B: MarketplaceDatabase>(db: &B, req: &LambdaRequest) -> LambdaResponse {
    if req.is_preflight() {
        return LambdaResponse::preflight();
    }
    try_create_engagement(db, req).await.unwrap_or_else(LambdaResponse::from)
}

async fn try_create_engagement<B: MarketplaceDatabase>(
    db: &B,
    req: &LambdaRequest,
) -> Result<LambdaResponse, HandlerError> {
    let body: CreateEngagementBody = req.json_body()?;
    let engagement = NewEngagement {
        tutor_id: require_positive_int("id_professor", body.tutor_id.as_ref())?,
        student_id: require_positive_int("id_aluno", body.student_id.as_ref())?,
        subject_id: require_positive_int("id_materia", body.subject_id.as_ref())?,
        contracted_hours: require_positive_int("horas_contratadas", body.contracted_hours.as_ref())?,
    };
    let id = db.insert_engagement(engagement).await?;
    info!("🤝️ Engagement {id} created");
    LambdaResponse::json(201, &json!({ "message": "Engagement created successfully", "id_conexao": id }))
}

/// Records a payment and queues it for settlement.
///
/// The row is committed with status `Pending` before the settlement request is published; see
/// [`PaymentFlowApi::create_payment`] for the ordering contract.
pub async fn create_payment<B, C>(api: &PaymentFlowApi<B, C>, req: &LambdaRequest) -> LambdaResponse
where
    B: MarketplaceDatabase,
    C: MessageChannel,
{
    if req.is_preflight() {
        return LambdaResponse::preflight();
    }
    try_create_payment(api, req).await.unwrap_or_else(LambdaResponse::from)
}

async fn try_create_payment<B, C>(
    api: &PaymentFlowApi<B, C>,
    req: &LambdaRequest,
) -> Result<LambdaResponse, HandlerError>
where
    B: MarketplaceDatabase,
    C: MessageChannel,
{
    let body: CreatePaymentBody = req.json_body()?;
    let engagement_id = require_positive_int("id_conexao", body.engagement_id.as_ref())?;
    let amount = body.amount.ok_or_else(|| HandlerError::Validation("Field 'valor' is required".into()))?;
    let method = require_string("forma_pagamento", body.method)?;
    let payment_id = api.create_payment(NewPayment::new(engagement_id, amount, method)).await?;
    LambdaResponse::json(
        201,
        &json!({ "message": "Payment recorded and queued for settlement", "id_pagamento": payment_id }),
    )
}

/// Lists a student's engagements. An empty list is a valid 200 response.
pub async fn engagements_by_student<B: MarketplaceDatabase>(db: &B, req: &LambdaRequest) -> LambdaResponse {
    if req.is_preflight() {
        return LambdaResponse::preflight();
    }
    try_engagements_by_student(db, req).await.unwrap_or_else(LambdaResponse::from)
}

async fn try_engagements_by_student<B: MarketplaceDatabase>(
    db: &B,
    req: &LambdaRequest,
) -> Result<LambdaResponse, HandlerError> {
    let student_id = required_query_int(req, "id_aluno")?;
    let engagements = db.engagements_for_student(student_id).await?;
    LambdaResponse::json(200, &engagements)
}

/// Lists a student's payments. An empty list is a valid 200 response.
pub async fn payments_by_student<B: MarketplaceDatabase>(db: &B, req: &LambdaRequest) -> LambdaResponse {
    if req.is_preflight() {
        return LambdaResponse::preflight();
    }
    try_payments_by_student(db, req).await.unwrap_or_else(LambdaResponse::from)
}

async fn try_payments_by_student<B: MarketplaceDatabase>(
    db: &B,
    req: &LambdaRequest,
) -> Result<LambdaResponse, HandlerError> {
    let student_id = required_query_int(req, "id_aluno")?;
    let payments = db.payments_for_student(student_id).await?;
    LambdaResponse::json(200, &payments)
}

fn required_query_int(req: &LambdaRequest, name: &str) -> Result<i64, HandlerError> {
    let value = req
        .query_param(name)
        .ok_or_else(|| HandlerError::Validation(format!("The query parameter '{name}' is required")))?;
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| HandlerError::Validation(format!("The query parameter '{name}' must be an integer")))
}
