pub mod errors;
pub mod payment_flow_api;
pub mod settlement_api;
