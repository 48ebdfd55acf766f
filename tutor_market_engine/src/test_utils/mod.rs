//! Shared test doubles for the engine's trait seams.
//!
//! Available to downstream crates through the `test_utils` feature, so handler tests can mock the database,
//! the message channel and the credential provider without redefining the mocks.
use mockall::mock;

use crate::{
    db_types::{
        EngagementSummary,
        NewEngagement,
        NewPayment,
        NewStudent,
        PaymentStatus,
        PaymentSummary,
        SettlementRequest,
        StudentUpdate,
        TutorListing,
    },
    traits::{
        ChannelError,
        CredentialError,
        CredentialProvider,
        DbCredentials,
        MarketplaceDatabase,
        MessageChannel,
        SettlementDecider,
        SettlementOutcome,
        StorageError,
    },
};

mock! {
    pub MarketplaceDb {}
    impl MarketplaceDatabase for MarketplaceDb {
        fn url(&self) -> &str;
        async fn search_tutors(&self, subject: Option<String>) -> Result<Vec<TutorListing>, StorageError>;
        async fn insert_student(&self, student: NewStudent) -> Result<i64, StorageError>;
        async fn student_exists(&self, national_id: &str) -> Result<bool, StorageError>;
        async fn update_student(&self, update: StudentUpdate) -> Result<(), StorageError>;
        async fn insert_engagement(&self, engagement: NewEngagement) -> Result<i64, StorageError>;
        async fn insert_payment(&self, payment: NewPayment) -> Result<i64, StorageError>;
        async fn update_payment_status(&self, payment_id: i64, status: PaymentStatus) -> Result<(), StorageError>;
        async fn engagements_for_student(&self, student_id: i64) -> Result<Vec<EngagementSummary>, StorageError>;
        async fn payments_for_student(&self, student_id: i64) -> Result<Vec<PaymentSummary>, StorageError>;
    }
}

mock! {
    pub Channel {}
    impl MessageChannel for Channel {
        async fn publish(&self, request: &SettlementRequest) -> Result<(), ChannelError>;
    }
}

mock! {
    pub Credentials {}
    impl CredentialProvider for Credentials {
        async fn fetch_credentials(&self, secret_id: &str) -> Result<DbCredentials, CredentialError>;
    }
}

/// A decider that always returns the configured outcome. Use it to force either terminal state in tests.
#[derive(Debug, Clone, Copy)]
pub struct ForcedDecider {
    outcome: SettlementOutcome,
}

impl ForcedDecider {
    pub fn new(outcome: SettlementOutcome) -> Self {
        Self { outcome }
    }

    pub fn paid() -> Self {
        Self::new(SettlementOutcome::Paid)
    }

    pub fn cancelled() -> Self {
        Self::new(SettlementOutcome::Cancelled)
    }
}

impl SettlementDecider for ForcedDecider {
    fn decide(&self, _request: &SettlementRequest) -> SettlementOutcome {
        self.outcome
    }
}

/// Initialise logging for tests. Safe to call more than once.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
