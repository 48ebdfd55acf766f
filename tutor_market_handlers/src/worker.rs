//! The settlement worker entry point.
use log::*;
use tutor_market_engine::{BatchOutcome, MarketplaceDatabase, SettlementApi, SettlementDecider};

use crate::events::MessageBatch;

/// Processes a batch of settlement messages, each one independently.
///
/// The batch itself always acknowledges success to the invocation platform; per-message failures are tallied
/// in the returned [`BatchOutcome`] and logged, never re-thrown. A zero-record batch is a successful no-op.
pub async fn handle_batch<B, D>(api: &SettlementApi<B, D>, batch: MessageBatch) -> BatchOutcome
where
    B: MarketplaceDatabase,
    D: SettlementDecider,
{
    info!("⚖️ Settlement batch received with {} record(s)", batch.records.len());
    api.process_batch(batch.records.into_iter().map(|r| r.body)).await
}
