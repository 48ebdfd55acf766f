use log::debug;
use sqlx::MySqlConnection;

use crate::{
    db_types::{NewPayment, PaymentStatus, PaymentSummary},
    traits::StorageError,
};

pub async fn insert_payment(payment: NewPayment, conn: &mut MySqlConnection) -> Result<i64, StorageError> {
    let result = sqlx::query(
        r#"
        INSERT INTO payments (engagement_id, amount, method, status)
        VALUES (?, ?, ?, 'Pending')
    "#,
    )
    .bind(payment.engagement_id)
    .bind(payment.amount)
    .bind(&payment.method)
    .execute(conn)
    .await?;
    let id = result.last_insert_id() as i64;
    debug!("🗃️ Payment {id} recorded against engagement {} with status Pending", payment.engagement_id);
    Ok(id)
}

/// Sets the payment status, keyed by payment id, unconditionally on the current stored value.
///
/// MySQL reports zero affected rows when the new value equals the stored one, which is exactly the duplicate
/// delivery case, so the affected-row count is deliberately not inspected here.
pub async fn update_status(
    payment_id: i64,
    status: PaymentStatus,
    conn: &mut MySqlConnection,
) -> Result<(), StorageError> {
    sqlx::query("UPDATE payments SET status = ? WHERE id = ?")
        .bind(status)
        .bind(payment_id)
        .execute(conn)
        .await?;
    debug!("🗃️ Payment {payment_id} status set to {status}");
    Ok(())
}

pub async fn payments_for_student(
    student_id: i64,
    conn: &mut MySqlConnection,
) -> Result<Vec<PaymentSummary>, StorageError> {
    let payments = sqlx::query_as(
        r#"
        SELECT p.id AS payment_id,
               p.engagement_id AS engagement_id,
               p.amount AS amount,
               p.method AS method,
               p.status AS status
        FROM payments p
        JOIN engagements e ON p.engagement_id = e.id
        WHERE e.student_id = ?
    "#,
    )
    .bind(student_id)
    .fetch_all(conn)
    .await?;
    Ok(payments)
}
