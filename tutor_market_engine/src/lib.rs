//! Tutor Market Engine
//!
//! The engine holds everything behind the marketplace request handlers: the typed records for each query, the
//! trait seams to the external collaborators (database, secret store, settlement queue, settlement processor)
//! and the two-stage payment settlement workflow.
//!
//! The library is divided into three main sections:
//! 1. The data types ([`mod@db_types`]). Each query has an explicit typed record; monetary values always
//!    serialize as plain JSON numbers.
//! 2. The trait seams ([`mod@traits`]). The MySQL backend implements [`MarketplaceDatabase`]; the secret store,
//!    queue transport and settlement processor are injected behind their own traits so handlers carry no hidden
//!    global clients.
//! 3. The settlement workflow APIs ([`PaymentFlowApi`] and [`SettlementApi`]). A payment is committed as
//!    `Pending` and only then queued; a worker later consumes the queue and writes the terminal state. The two
//!    stages never share in-process state.
mod api;
mod mysql;

pub mod db_types;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use api::{
    errors::{PaymentFlowError, SettlementError},
    payment_flow_api::PaymentFlowApi,
    settlement_api::{BatchOutcome, SettlementApi},
};
pub use mysql::MySqlDatabase;
pub use traits::{
    ChannelError,
    CredentialError,
    CredentialProvider,
    DbCredentials,
    MarketplaceDatabase,
    MessageChannel,
    RandomDecider,
    SettlementDecider,
    SettlementOutcome,
    StorageError,
};
