use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;
use tm_common::Money;

//--------------------------------------    PaymentStatus    ---------------------------------------------------------

/// The lifecycle of a payment. Payments are created as `Pending` and transition exactly once, by the settlement
/// worker, to one of the two terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// The payment has been recorded and a settlement request has been queued.
    Pending,
    /// The settlement processor accepted the payment.
    Paid,
    /// The settlement processor declined the payment.
    Cancelled,
}

impl PaymentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentStatus::Paid | PaymentStatus::Cancelled)
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "Pending"),
            PaymentStatus::Paid => write!(f, "Paid"),
            PaymentStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid payment status: {0}")]
pub struct ConversionError(String);

impl FromStr for PaymentStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Paid" => Ok(Self::Paid),
            "Cancelled" => Ok(Self::Cancelled),
            s => Err(ConversionError(s.to_string())),
        }
    }
}

//--------------------------------------      NewStudent     ---------------------------------------------------------

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    /// The student's national id (CPF). Unique in the database.
    pub national_id: String,
}

impl NewStudent {
    pub fn new<S: Into<String>>(name: S, national_id: S) -> Self {
        Self { name: name.into(), national_id: national_id.into() }
    }
}

//--------------------------------------    StudentUpdate    ---------------------------------------------------------

/// A partial update for an existing student, keyed by national id. Only the supplied fields are written.
#[derive(Debug, Clone, Default)]
pub struct StudentUpdate {
    pub national_id: String,
    pub name: Option<String>,
}

impl StudentUpdate {
    pub fn new<S: Into<String>>(national_id: S) -> Self {
        Self { national_id: national_id.into(), name: None }
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// True if at least one updatable field has been supplied.
    pub fn has_changes(&self) -> bool {
        self.name.is_some()
    }
}

//--------------------------------------    TutorListing     ---------------------------------------------------------

/// One row of the tutor search result: a tutor paired with one of the subjects they teach.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct TutorListing {
    #[serde(rename = "id_professor")]
    pub tutor_id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "valor_hora")]
    pub hourly_rate: Money,
    #[serde(rename = "nome_materia")]
    pub subject: String,
}

//--------------------------------------    NewEngagement    ---------------------------------------------------------

#[derive(Debug, Clone)]
pub struct NewEngagement {
    pub tutor_id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub contracted_hours: i64,
}

//--------------------------------------  EngagementSummary  ---------------------------------------------------------

/// One row of the engagements-by-student query.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct EngagementSummary {
    #[serde(rename = "id_conexao")]
    pub engagement_id: i64,
    #[serde(rename = "professor")]
    pub tutor: String,
    #[serde(rename = "nome_materia")]
    pub subject: String,
    #[serde(rename = "horas_contratadas")]
    pub contracted_hours: i64,
    pub status: String,
}

//--------------------------------------      NewPayment     ---------------------------------------------------------

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub engagement_id: i64,
    pub amount: Money,
    /// Free-text payment method, e.g. "pix" or "credit card".
    pub method: String,
}

impl NewPayment {
    pub fn new<S: Into<String>>(engagement_id: i64, amount: Money, method: S) -> Self {
        Self { engagement_id, amount, method: method.into() }
    }
}

//--------------------------------------   PaymentSummary    ---------------------------------------------------------

/// One row of the payments-by-student query.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct PaymentSummary {
    #[serde(rename = "id_pagamento")]
    pub payment_id: i64,
    #[serde(rename = "id_conexao")]
    pub engagement_id: i64,
    #[serde(rename = "valor")]
    pub amount: Money,
    #[serde(rename = "forma_pagamento")]
    pub method: String,
    pub status: PaymentStatus,
}

//--------------------------------------  SettlementRequest  ---------------------------------------------------------

/// The message published to the settlement queue when a payment is recorded.
///
/// The field names on the wire are fixed by the deployed queue consumers and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementRequest {
    #[serde(rename = "id_pagamento")]
    pub payment_id: i64,
    #[serde(rename = "id_conexao")]
    pub engagement_id: i64,
    #[serde(rename = "valor")]
    pub amount: Money,
    #[serde(rename = "forma_pagamento")]
    pub method: String,
    #[serde(rename = "status_pagamento")]
    pub status: PaymentStatus,
}

impl SettlementRequest {
    pub fn for_new_payment(payment_id: i64, payment: &NewPayment) -> Self {
        Self {
            payment_id,
            engagement_id: payment.engagement_id,
            amount: payment.amount,
            method: payment.method.clone(),
            status: PaymentStatus::Pending,
        }
    }
}
