//! Database layer: driver glue and the scripted operation runner.
//!
//! Built on the `sqlx` `Any` driver, so the endpoint database is chosen by
//! the connection URL -- embedded SQLite in the test suite, a network
//! database in deployment.

pub mod error;
pub mod rows;
pub mod tour;

pub use error::RunError;
pub use tour::run;

use std::sync::Once;

use sqlx::{AnyConnection, Connection};

use galaxy_core::ConnectionString;

static INSTALL_DRIVERS: Once = Once::new();

/// Open a single exclusively-owned connection to the endpoint.
///
/// Driver registration for the `Any` dispatcher is process-wide and happens
/// exactly once.
pub async fn connect(url: &ConnectionString) -> Result<AnyConnection, sqlx::Error> {
    INSTALL_DRIVERS.call_once(sqlx::any::install_default_drivers);
    AnyConnection::connect(url.as_str()).await
}
