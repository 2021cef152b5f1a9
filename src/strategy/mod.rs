//! Pluggable authentication strategies and the JSON credential strategy.

pub mod config;
pub mod content_type;
pub mod json;
pub mod signals;
pub mod verify;

pub use config::StrategyConfig;
pub use json::{JsonStrategy, JsonStrategyBuilder};
pub use signals::{Info, Outcome, OutcomeSender, Signals, outcome_channel};
pub use verify::{
    Credentials, FnVerifier, RequestFnVerifier, Verdict, Verifier, verify_fn, verify_request_fn,
};

use crate::error::AuthError;
use crate::request::CredentialRequest;

/// Per-call options supplied by the host.
#[derive(Debug, Clone, Default)]
pub struct AuthenticateOptions {
    /// Replaces the message of both bad-request failures.
    pub bad_request_message: Option<String>,
}

impl AuthenticateOptions {
    pub fn bad_request_message(message: impl Into<String>) -> Self {
        Self {
            bad_request_message: Some(message.into()),
        }
    }

    /// The override message, or `default` when none (or an empty one) is set.
    pub(crate) fn message_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.bad_request_message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(default)
    }
}

/// One authentication method inside a host's middleware pipeline.
///
/// The host hands each request to [`Strategy::authenticate`] together with
/// its [`Signals`]; the strategy reports exactly one outcome through them.
#[async_trait::async_trait]
pub trait Strategy: Send + Sync + 'static {
    type User: Send + 'static;

    /// The name the host registers this strategy under.
    fn name(&self) -> &str;

    async fn authenticate(
        &self,
        request: &dyn CredentialRequest,
        options: &AuthenticateOptions,
        signals: Box<dyn Signals<Self::User>>,
    );

    /// Runs [`Strategy::authenticate`] and returns the reported outcome.
    async fn outcome(
        &self,
        request: &dyn CredentialRequest,
        options: &AuthenticateOptions,
    ) -> Outcome<Self::User> {
        let (signals, rx) = outcome_channel();
        self.authenticate(request, options, signals).await;
        rx.await.unwrap_or(Outcome::Error(AuthError::Abandoned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_override() {
        let opts = AuthenticateOptions::default();
        assert_eq!(opts.message_or("Missing credentials"), "Missing credentials");

        let opts = AuthenticateOptions::bad_request_message("Bad login");
        assert_eq!(opts.message_or("Missing credentials"), "Bad login");

        let opts = AuthenticateOptions::bad_request_message("");
        assert_eq!(opts.message_or("Missing credentials"), "Missing credentials");
    }

    struct Silent;

    #[async_trait::async_trait]
    impl Strategy for Silent {
        type User = ();

        fn name(&self) -> &str {
            "silent"
        }

        async fn authenticate(
            &self,
            _request: &dyn CredentialRequest,
            _options: &AuthenticateOptions,
            signals: Box<dyn Signals<()>>,
        ) {
            drop(signals);
        }
    }

    #[tokio::test]
    async fn outcome_reports_abandoned_when_no_signal_sent() {
        let req = crate::request::JsonRequest::new();
        let outcome = Silent.outcome(&req, &AuthenticateOptions::default()).await;
        assert!(matches!(outcome, Outcome::Error(AuthError::Abandoned)));
    }
}
