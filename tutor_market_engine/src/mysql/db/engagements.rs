use log::debug;
use sqlx::MySqlConnection;

use crate::{
    db_types::{EngagementSummary, NewEngagement},
    traits::StorageError,
};

pub async fn insert_engagement(engagement: NewEngagement, conn: &mut MySqlConnection) -> Result<i64, StorageError> {
    let result = sqlx::query(
        r#"
        INSERT INTO engagements (tutor_id, student_id, subject_id, contracted_hours, status)
        VALUES (?, ?, ?, ?, 'Active')
    "#,
    )
    .bind(engagement.tutor_id)
    .bind(engagement.student_id)
    .bind(engagement.subject_id)
    .bind(engagement.contracted_hours)
    .execute(conn)
    .await?;
    let id = result.last_insert_id() as i64;
    debug!("🗃️ Engagement {id} created for student {}", engagement.student_id);
    Ok(id)
}

pub async fn engagements_for_student(
    student_id: i64,
    conn: &mut MySqlConnection,
) -> Result<Vec<EngagementSummary>, StorageError> {
    let engagements = sqlx::query_as(
        r#"
        SELECT e.id AS engagement_id,
               t.name AS tutor,
               s.name AS subject,
               e.contracted_hours AS contracted_hours,
               e.status AS status
        FROM engagements e
        JOIN tutors t ON e.tutor_id = t.id
        JOIN subjects s ON e.subject_id = s.id
        WHERE e.student_id = ?
    "#,
    )
    .bind(student_id)
    .fetch_all(conn)
    .await?;
    Ok(engagements)
}
