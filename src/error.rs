/// Represents a result type for operations in the Beacon SDK.
///
/// This `Result` type is a standard Rust `Result` type where the error variant is defined by the
/// SDK-specific [`Error`] enum.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum representing possible errors that can occur in the Beacon SDK.
///
/// All variants signal a caller-side contract violation and are surfaced synchronously at the
/// call that violates the invariant. There are no retries at this layer; delivery-level failures
/// (network, queue overflow) belong to the event-logging engine and never appear here.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Invalid host-supplied input at configuration time.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// No access token was supplied before initialization. Not recoverable by retrying; the host
    /// must provide a token explicitly or via platform metadata.
    #[error("access token not found")]
    MissingCredential,

    /// A second initialization attempt within the same process. Signals a programming error in
    /// the host application.
    #[error("SDK instance already exists")]
    AlreadyInitialized,
}
