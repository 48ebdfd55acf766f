//! Request body shapes and field coercion helpers.
//!
//! The JSON field names are the ones the deployed storefront sends; the Rust-side names are the domain names.
//! Ids arrive either as JSON numbers or numeric strings and must coerce to positive integers.
use serde::Deserialize;
use serde_json::Value;
use tm_common::Money;

use crate::errors::HandlerError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterStudentBody {
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
    #[serde(rename = "cpf", default)]
    pub national_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStudentBody {
    #[serde(rename = "cpf", default)]
    pub national_id: Option<String>,
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEngagementBody {
    #[serde(rename = "id_professor", default)]
    pub tutor_id: Option<Value>,
    #[serde(rename = "id_aluno", default)]
    pub student_id: Option<Value>,
    #[serde(rename = "id_materia", default)]
    pub subject_id: Option<Value>,
    #[serde(rename = "horas_contratadas", default)]
    pub contracted_hours: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePaymentBody {
    #[serde(rename = "id_conexao", default)]
    pub engagement_id: Option<Value>,
    #[serde(rename = "valor", default)]
    pub amount: Option<Money>,
    #[serde(rename = "forma_pagamento", default)]
    pub method: Option<String>,
}

/// Returns the field's value when present and non-blank, or a `Validation` error naming the field.
pub fn require_string(name: &str, value: Option<String>) -> Result<String, HandlerError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| HandlerError::Validation(format!("Field '{name}' is required")))
}

/// Coerces the field to a positive integer, accepting JSON numbers and numeric strings.
pub fn require_positive_int(name: &str, value: Option<&Value>) -> Result<i64, HandlerError> {
    let value = value.ok_or_else(|| HandlerError::Validation(format!("Field '{name}' is required")))?;
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed
        .filter(|n| *n > 0)
        .ok_or_else(|| HandlerError::Validation(format!("Field '{name}' must be a positive integer")))
}
