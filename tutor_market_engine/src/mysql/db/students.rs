use log::debug;
use sqlx::MySqlConnection;

use crate::{
    db_types::{NewStudent, StudentUpdate},
    traits::StorageError,
};

pub async fn insert_student(student: NewStudent, conn: &mut MySqlConnection) -> Result<i64, StorageError> {
    let result = sqlx::query("INSERT INTO students (name, national_id) VALUES (?, ?)")
        .bind(&student.name)
        .bind(&student.national_id)
        .execute(conn)
        .await?;
    let id = result.last_insert_id() as i64;
    debug!("🗃️ Student '{}' registered with id {id}", student.name);
    Ok(id)
}

pub async fn student_exists(national_id: &str, conn: &mut MySqlConnection) -> Result<bool, StorageError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE national_id = ?")
        .bind(national_id)
        .fetch_one(conn)
        .await?;
    Ok(count > 0)
}

/// Applies the update to the student row. The caller has already validated that the update carries at least one
/// field; an empty update never reaches the database.
pub async fn update_student(update: StudentUpdate, conn: &mut MySqlConnection) -> Result<(), StorageError> {
    let Some(name) = update.name else {
        return Ok(());
    };
    sqlx::query("UPDATE students SET name = ? WHERE national_id = ?")
        .bind(name)
        .bind(&update.national_id)
        .execute(conn)
        .await?;
    debug!("🗃️ Student record updated");
    Ok(())
}
