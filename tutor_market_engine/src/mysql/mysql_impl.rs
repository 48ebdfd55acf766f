//! `MySqlDatabase` is the concrete implementation of [`MarketplaceDatabase`] used in production.
//!
//! Each invocation builds its own database handle from credentials fetched at invocation time, holds a single
//! pooled connection, and releases it when the handle is dropped, on every exit path.
use std::fmt::Debug;

use log::trace;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool};

use super::db::{engagements, new_pool, payments, students, tutors};
use crate::{
    db_types::{
        EngagementSummary,
        NewEngagement,
        NewPayment,
        NewStudent,
        PaymentStatus,
        PaymentSummary,
        StudentUpdate,
        TutorListing,
    },
    traits::{DbCredentials, MarketplaceDatabase, StorageError},
};

#[derive(Clone)]
pub struct MySqlDatabase {
    url: String,
    pool: MySqlPool,
}

impl Debug for MySqlDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "MySqlDatabase ({})", self.url)
    }
}

impl MySqlDatabase {
    /// Connects to the database through the proxy endpoint with the given credentials.
    ///
    /// The pool is capped at a single connection, matching the one-connection-per-invocation resource model,
    /// and connection acquisition is bounded by [`super::db::DB_CONNECT_TIMEOUT`].
    pub async fn connect(host: &str, database: &str, credentials: &DbCredentials) -> Result<Self, StorageError> {
        let options = MySqlConnectOptions::new()
            .host(host)
            .database(database)
            .username(&credentials.username)
            .password(credentials.password.reveal());
        let url = format!("mysql://{}@{host}/{database}", credentials.username);
        trace!("🗃️ Creating new database connection pool for {url}");
        let pool = new_pool(options, 1).await.map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(Self { url, pool })
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

impl MarketplaceDatabase for MySqlDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn search_tutors(&self, subject: Option<String>) -> Result<Vec<TutorListing>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        tutors::search_tutors(subject, &mut conn).await
    }

    async fn insert_student(&self, student: NewStudent) -> Result<i64, StorageError> {
        let mut conn = self.pool.acquire().await?;
        students::insert_student(student, &mut conn).await
    }

    async fn student_exists(&self, national_id: &str) -> Result<bool, StorageError> {
        let mut conn = self.pool.acquire().await?;
        students::student_exists(national_id, &mut conn).await
    }

    async fn update_student(&self, update: StudentUpdate) -> Result<(), StorageError> {
        let mut conn = self.pool.acquire().await?;
        students::update_student(update, &mut conn).await
    }

    async fn insert_engagement(&self, engagement: NewEngagement) -> Result<i64, StorageError> {
        let mut conn = self.pool.acquire().await?;
        engagements::insert_engagement(engagement, &mut conn).await
    }

    async fn insert_payment(&self, payment: NewPayment) -> Result<i64, StorageError> {
        let mut conn = self.pool.acquire().await?;
        payments::insert_payment(payment, &mut conn).await
    }

    async fn update_payment_status(&self, payment_id: i64, status: PaymentStatus) -> Result<(), StorageError> {
        let mut conn = self.pool.acquire().await?;
        payments::update_status(payment_id, status, &mut conn).await
    }

    async fn engagements_for_student(&self, student_id: i64) -> Result<Vec<EngagementSummary>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        engagements::engagements_for_student(student_id, &mut conn).await
    }

    async fn payments_for_student(&self, student_id: i64) -> Result<Vec<PaymentSummary>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        payments::payments_for_student(student_id, &mut conn).await
    }
}
