use std::fmt::Debug;

use log::*;

use crate::{
    api::errors::PaymentFlowError,
    db_types::{NewPayment, SettlementRequest},
    traits::{MarketplaceDatabase, MessageChannel},
};

/// Stage 1 of the settlement workflow: record a payment and hand it to the settlement queue.
///
/// The ordering contract is strict: the `Pending` row must be durably committed before the settlement request
/// becomes observable on the channel, so a worker that consumes the message immediately is guaranteed to find
/// the row.
pub struct PaymentFlowApi<B, C> {
    db: B,
    channel: C,
}

impl<B, C> Debug for PaymentFlowApi<B, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentFlowApi")
    }
}

impl<B, C> PaymentFlowApi<B, C> {
    pub fn new(db: B, channel: C) -> Self {
        Self { db, channel }
    }
}

impl<B, C> PaymentFlowApi<B, C>
where
    B: MarketplaceDatabase,
    C: MessageChannel,
{
    /// Inserts the payment with status `Pending`, then publishes the settlement request.
    ///
    /// Returns the generated payment id. If publishing fails after the insert committed, the error carries the
    /// payment id and the row is left `Pending`; it is not rolled back.
    pub async fn create_payment(&self, payment: NewPayment) -> Result<i64, PaymentFlowError> {
        let payment_id = self.db.insert_payment(payment.clone()).await?;
        debug!("💳️ Payment {payment_id} committed with status Pending");
        let request = SettlementRequest::for_new_payment(payment_id, &payment);
        self.channel.publish(&request).await.map_err(|e| {
            error!(
                "💳️ Payment {payment_id} is committed, but its settlement request was not published. The row \
                 remains Pending until it is reconciled. {e}"
            );
            PaymentFlowError::Transport { payment_id, source: e }
        })?;
        info!("💳️ Payment {payment_id} recorded and queued for settlement");
        Ok(payment_id)
    }
}
