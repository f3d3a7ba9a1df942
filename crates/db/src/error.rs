/// Failure modes of a scripted run.
///
/// These never escape [`crate::tour::run`]: the runner converts them into
/// the trace's terminal error entry, with the offending statement carried
/// in the message.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The endpoint was resolved but the connection could not be opened.
    #[error("connection failed: {0}")]
    Connect(#[source] sqlx::Error),

    /// A statement failed mid-sequence.
    #[error("statement failed ({sql}): {source}")]
    Statement {
        /// The statement text as sent to the driver.
        sql: String,
        #[source]
        source: sqlx::Error,
    },
}

impl RunError {
    pub(crate) fn statement(sql: &str, source: sqlx::Error) -> Self {
        Self::Statement {
            sql: sql.to_string(),
            source,
        }
    }
}
