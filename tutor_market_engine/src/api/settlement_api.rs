use std::fmt::Debug;

use log::*;

use crate::{
    api::errors::SettlementError,
    db_types::SettlementRequest,
    traits::{MarketplaceDatabase, SettlementDecider, SettlementOutcome},
};

/// Stage 2 of the settlement workflow: consume settlement requests and persist terminal payment states.
///
/// The decision itself is delegated to an injected [`SettlementDecider`], standing in for a call to a real
/// payment processor.
pub struct SettlementApi<B, D> {
    db: B,
    decider: D,
}

impl<B, D> Debug for SettlementApi<B, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SettlementApi")
    }
}

impl<B, D> SettlementApi<B, D> {
    pub fn new(db: B, decider: D) -> Self {
        Self { db, decider }
    }
}

/// The tally of a processed batch. Stands in for the metric counters the surrounding platform would scrape:
/// one count per update executed plus one per terminal outcome reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub updates_executed: u64,
    pub paid: u64,
    pub cancelled: u64,
    pub failures: Vec<String>,
}

impl BatchOutcome {
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}

impl<B, D> SettlementApi<B, D>
where
    B: MarketplaceDatabase,
    D: SettlementDecider,
{
    /// Processes a batch of raw message bodies, each one independently.
    ///
    /// A malformed or failing message is recorded in the outcome's failure list and does not abort the rest of
    /// the batch. An empty batch is a successful no-op with zero database writes.
    pub async fn process_batch<I>(&self, bodies: I) -> BatchOutcome
    where I: IntoIterator<Item = String> {
        let mut outcome = BatchOutcome::default();
        for body in bodies {
            match self.process_message(&body).await {
                Ok(settled) => {
                    outcome.updates_executed += 1;
                    match settled {
                        SettlementOutcome::Paid => outcome.paid += 1,
                        SettlementOutcome::Cancelled => outcome.cancelled += 1,
                    }
                },
                Err(e) => {
                    error!("⚖️ A settlement message failed and is skipped. {e}");
                    outcome.failures.push(e.to_string());
                },
            }
        }
        info!(
            "⚖️ Settlement batch complete. {} update(s) executed, {} paid, {} cancelled, {} failed",
            outcome.updates_executed,
            outcome.paid,
            outcome.cancelled,
            outcome.failure_count()
        );
        outcome
    }

    /// Settles a single request: decide the outcome and write the terminal status, keyed by payment id.
    ///
    /// The update does not re-check that the stored status is still `Pending`. Duplicate deliveries therefore
    /// write the same terminal value twice, which is harmless by value.
    pub async fn settle(&self, request: &SettlementRequest) -> Result<SettlementOutcome, SettlementError> {
        let outcome = self.decider.decide(request);
        self.db.update_payment_status(request.payment_id, outcome.as_status()).await?;
        debug!("⚖️ Payment {} settled as {}", request.payment_id, outcome.as_status());
        Ok(outcome)
    }

    async fn process_message(&self, body: &str) -> Result<SettlementOutcome, SettlementError> {
        let request: SettlementRequest =
            serde_json::from_str(body).map_err(|e| SettlementError::MalformedMessage(e.to_string()))?;
        self.settle(&request).await
    }
}
