//! Domain types for the Galaxy SQL tour service.
//!
//! Pure data and logic shared by the database runner and the HTTP surface:
//! the execution trace model, database credential resolution, and the error
//! taxonomy. No I/O happens in this crate.

pub mod credentials;
pub mod error;
pub mod trace;

pub use credentials::ConnectionString;
pub use error::CredentialError;
pub use trace::{Step, Trace, TraceEntry};
