use rand::Rng;

use crate::db_types::{PaymentStatus, SettlementRequest};

/// The outcome of a settlement decision. Exactly two terminal states exist; `Pending` is not representable
/// here, so a decider can never leave a payment in limbo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementOutcome {
    Paid,
    Cancelled,
}

impl SettlementOutcome {
    pub fn as_status(&self) -> PaymentStatus {
        match self {
            SettlementOutcome::Paid => PaymentStatus::Paid,
            SettlementOutcome::Cancelled => PaymentStatus::Cancelled,
        }
    }
}

/// Decides the fate of a pending payment. In production this stands in for a call to a third-party payment
/// processor; in tests an implementation can force either outcome.
pub trait SettlementDecider {
    fn decide(&self, request: &SettlementRequest) -> SettlementOutcome;
}

/// The production stand-in for the payment processor: a coin flip.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDecider;

impl SettlementDecider for RandomDecider {
    fn decide(&self, _request: &SettlementRequest) -> SettlementOutcome {
        if rand::thread_rng().gen_bool(0.5) {
            SettlementOutcome::Paid
        } else {
            SettlementOutcome::Cancelled
        }
    }
}
