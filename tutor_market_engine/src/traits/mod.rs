//! The seams between the marketplace logic and its external collaborators.
//!
//! Every collaborator the handlers talk to (the SQL database, the secret store, the settlement queue and the
//! third-party settlement processor) is reached through a trait defined here, so that concrete backends can be
//! swapped out and tests can inject mocks.
mod credential_provider;
mod marketplace_database;
mod message_channel;
mod settlement;

pub use credential_provider::{CredentialError, CredentialProvider, DbCredentials};
pub use marketplace_database::{MarketplaceDatabase, StorageError};
pub use message_channel::{ChannelError, MessageChannel};
pub use settlement::{RandomDecider, SettlementDecider, SettlementOutcome};
