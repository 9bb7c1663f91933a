use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by an automation provider.
///
/// Providers map their backend-specific failures onto these variants so the
/// session layer can report one primary error per failed operation without
/// inspecting backend details.
#[derive(Debug, Error)]
pub enum Error {
    /// The remote endpoint did not accept a connection within the bounded
    /// connect timeout.
    #[error("connection refused: {endpoint}")]
    ConnectionRefused { endpoint: String },

    /// The browser process or server could not start (bad executable path,
    /// port in use, missing profile directory).
    #[error("browser launch failed: {0}")]
    LaunchFailure(String),

    /// A bounded wait exceeded its configured deadline.
    #[error("timeout after {ms}ms waiting for: {condition}")]
    Timeout { ms: u64, condition: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true for deadline-exceeded failures.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    /// Returns true for unreachable-endpoint failures.
    pub fn is_connection_refused(&self) -> bool {
        matches!(self, Error::ConnectionRefused { .. })
    }
}
