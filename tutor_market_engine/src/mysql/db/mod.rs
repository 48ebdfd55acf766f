pub(crate) mod engagements;
pub(crate) mod payments;
pub(crate) mod students;
pub(crate) mod tutors;

use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};

/// Bounded connection timeout. A failing database proxy must fail the invocation fast rather than letting the
/// invocation hang to its platform-imposed ceiling.
pub const DB_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn new_pool(options: MySqlConnectOptions, max_connections: u32) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(DB_CONNECT_TIMEOUT)
        .connect_with(options)
        .await
}
