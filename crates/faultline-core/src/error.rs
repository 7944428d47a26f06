//! Shared error type across faultline crates.

use thiserror::Error;

/// Stable error kinds (used in logs and by tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid or malformed configuration.
    Config,
    /// Message template rejected at setup time.
    Template,
    /// Reporting collaborator failed.
    Report,
    /// View could not be rendered.
    Render,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    /// String representation used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Config => "CONFIG",
            ErrorKind::Template => "TEMPLATE",
            ErrorKind::Report => "REPORT",
            ErrorKind::Render => "RENDER",
            ErrorKind::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, FaultlineError>;

/// Unified error type used by core and web.
#[derive(Debug, Error)]
pub enum FaultlineError {
    #[error("invalid config: {0}")]
    Config(String),
    #[error("invalid message template: {0}")]
    Template(String),
    #[error("report failed: {0}")]
    Report(String),
    #[error("render failed: {0}")]
    Render(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl FaultlineError {
    /// Map the error to its stable kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FaultlineError::Config(_) => ErrorKind::Config,
            FaultlineError::Template(_) => ErrorKind::Template,
            FaultlineError::Report(_) => ErrorKind::Report,
            FaultlineError::Render(_) => ErrorKind::Render,
            FaultlineError::UnsupportedVersion => ErrorKind::UnsupportedVersion,
            FaultlineError::Internal(_) => ErrorKind::Internal,
        }
    }
}
