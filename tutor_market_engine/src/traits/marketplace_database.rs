use thiserror::Error;

use crate::db_types::{
    EngagementSummary,
    NewEngagement,
    NewPayment,
    NewStudent,
    PaymentStatus,
    PaymentSummary,
    StudentUpdate,
    TutorListing,
};

/// The complete set of SQL operations backing the marketplace handlers.
///
/// Every method maps to exactly one parameterized statement (or one statement plus an existence probe). The
/// backend owns connection acquisition and release; callers never see a connection object.
#[allow(async_fn_in_trait)]
pub trait MarketplaceDatabase {
    /// The URL of the database.
    fn url(&self) -> &str;

    /// Fetches all tutor/subject pairs, optionally filtered by subject name.
    async fn search_tutors(&self, subject: Option<String>) -> Result<Vec<TutorListing>, StorageError>;

    /// Inserts a new student and returns the generated id.
    ///
    /// No duplicate check is performed first. A uniqueness violation on the national id surfaces as
    /// [`StorageError::UniqueViolation`].
    async fn insert_student(&self, student: NewStudent) -> Result<i64, StorageError>;

    /// Checks whether a student with the given national id exists.
    async fn student_exists(&self, national_id: &str) -> Result<bool, StorageError>;

    /// Applies a partial update to the student identified by `update.national_id`.
    ///
    /// Callers must ensure the update carries at least one field; an empty update is a no-op.
    async fn update_student(&self, update: StudentUpdate) -> Result<(), StorageError>;

    /// Inserts a new engagement with status `Active` and returns the generated id.
    async fn insert_engagement(&self, engagement: NewEngagement) -> Result<i64, StorageError>;

    /// Inserts a new payment with status `Pending` and returns the generated id.
    async fn insert_payment(&self, payment: NewPayment) -> Result<i64, StorageError>;

    /// Sets the payment's status, keyed by payment id.
    ///
    /// The update is unconditional on the stored status. Under at-least-once delivery the same terminal status
    /// may be written twice; that second write is idempotent by value.
    async fn update_payment_status(&self, payment_id: i64, status: PaymentStatus) -> Result<(), StorageError>;

    /// Fetches all engagements for the given student. An empty list is a valid result.
    async fn engagements_for_student(&self, student_id: i64) -> Result<Vec<EngagementSummary>, StorageError>;

    /// Fetches all payments for the given student. An empty list is a valid result.
    async fn payments_for_student(&self, student_id: i64) -> Result<Vec<PaymentSummary>, StorageError>;
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not connect to the database. {0}")]
    Connection(String),
    #[error("A unique constraint was violated. {0}")]
    UniqueViolation(String),
    #[error("The query could not be executed. {0}")]
    Query(String),
    #[error("The requested record was not found. {0}")]
    NotFound(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::UniqueViolation(db.to_string()),
            sqlx::Error::PoolTimedOut => Self::Connection("Timed out waiting for a database connection".into()),
            sqlx::Error::Io(io) => Self::Connection(io.to_string()),
            sqlx::Error::RowNotFound => Self::NotFound("No matching row".into()),
            e => Self::Query(e.to_string()),
        }
    }
}
