use log::debug;
use sqlx::MySqlConnection;

use crate::{db_types::TutorListing, traits::StorageError};

const SEARCH_BASE: &str = r#"
    SELECT t.id AS tutor_id, t.name AS name, t.hourly_rate AS hourly_rate, s.name AS subject
    FROM tutors t
    JOIN tutor_subjects ts ON t.id = ts.tutor_id
    JOIN subjects s ON ts.subject_id = s.id
"#;

/// Fetches tutor/subject pairs, filtered by subject name when one is given. With no filter, every pair in the
/// dataset is returned.
pub async fn search_tutors(
    subject: Option<String>,
    conn: &mut MySqlConnection,
) -> Result<Vec<TutorListing>, StorageError> {
    let listings: Vec<TutorListing> = match subject {
        Some(name) => {
            let sql = format!("{SEARCH_BASE} WHERE s.name = ?");
            sqlx::query_as(&sql).bind(name).fetch_all(conn).await?
        },
        None => sqlx::query_as(SEARCH_BASE).fetch_all(conn).await?,
    };
    debug!("🗃️ Tutor search returned {} listing(s)", listings.len());
    Ok(listings)
}
