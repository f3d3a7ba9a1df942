/// Failure modes of database endpoint resolution.
///
/// All variants are deterministic configuration failures: they occur before
/// any connection attempt is made.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Neither a direct endpoint URL nor a service credential document was
    /// configured.
    #[error("no database endpoint configured: set DATABASE_URL or bind a database service")]
    MissingEndpoint,

    /// The service credential document is not valid JSON or does not have
    /// the expected shape.
    #[error("malformed service credential document: {0}")]
    MalformedDocument(#[from] serde_json::Error),

    /// The document parsed, but the named service has no binding in it.
    #[error("service '{0}' has no credential binding")]
    ServiceNotBound(String),
}
