//! MySQL backend for the tutor marketplace engine.
//!
//! Handlers reach the database through an RDS-proxy style endpoint, so the connect options are built from a
//! host, a database name and credentials fetched at invocation time rather than from a connection URL.
mod mysql_impl;

pub mod db;
pub use mysql_impl::MySqlDatabase;
