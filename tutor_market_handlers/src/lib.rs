//! Tutor Marketplace Handlers
//!
//! The invocation-facing layer of the tutoring marketplace: a set of independent, stateless request handlers
//! (tutor search, student registration and update, engagement creation, payment creation, per-student queries)
//! plus the queue-triggered settlement worker.
//!
//! Each handler is a plain async function, generic over the engine's trait seams, that turns an inbound
//! [`events::LambdaRequest`] into the uniform [`events::LambdaResponse`] envelope. Wiring of the real
//! collaborators (config, credential provider, database, queue) lives in [`runtime`]; tests inject mocks
//! instead.
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod runtime;
pub mod worker;
