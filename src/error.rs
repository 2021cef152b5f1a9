//! Error types for the JSON credential strategy.

use crate::strategy::Info;

/// Errors raised while building or running a strategy.
///
/// Client input problems (wrong content type, missing credentials) and
/// rejected credentials are not errors: they are reported as `fail` signals.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("verification error: {0}")]
    Verification(String),

    #[error("verifier panicked: {0}")]
    Panicked(String),

    #[error("strategy finished without reporting an outcome")]
    Abandoned,
}

impl AuthError {
    /// Wraps any displayable error as a verification error.
    pub fn verification(e: impl std::fmt::Display) -> Self {
        Self::Verification(e.to_string())
    }

    /// Renders this error as a `{"message": ...}` info object for the host.
    pub fn to_info(&self) -> Info {
        Info::from_message(self.to_string())
    }
}
