use thiserror::Error;

/// Failure modes of the Whisk client.
///
/// Every public operation returns `Result<T>`; nothing panics across the
/// API boundary. The remote service reports errors as opaque messages, so
/// all variants carry a human-readable string rather than structured codes.
#[derive(Debug, Error)]
pub enum WhiskError {
    /// Missing or invalid arguments/credential state, detected before any
    /// network call is attempted.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The session-to-bearer-token bootstrap failed.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The transport itself failed (connect, DNS, TLS, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A well-formed JSON response explicitly reported an error condition.
    #[error("Remote service error: {0}")]
    RemoteService(String),

    /// Response text was not valid JSON, or lacked an expected field path.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Local file I/O failed while persisting decoded image bytes.
    #[error("I/O error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, WhiskError>;
