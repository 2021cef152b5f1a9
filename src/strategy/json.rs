//! Username/password authentication from JSON request bodies.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use http::StatusCode;
use serde_json::Value;

use crate::error::AuthError;
use crate::lookup::lookup;
use crate::request::CredentialRequest;
use crate::strategy::config::StrategyConfig;
use crate::strategy::content_type;
use crate::strategy::signals::{Info, Signals};
use crate::strategy::verify::{Credentials, Verdict, Verifier};
use crate::strategy::{AuthenticateOptions, Strategy};

/// Name under which the strategy registers with a host.
pub const NAME: &str = "json";

pub const UNACCEPTABLE_CONTENT_TYPE: &str = "Unacceptable content type";
pub const MISSING_CREDENTIALS: &str = "Missing credentials";

/// Authenticates requests whose JSON body carries a username and password.
///
/// A request passes two gates before the verifier sees it:
///
/// - its `Content-Type` is `application/json`, optionally with a UTF
///   charset, or it fails with 415;
/// - the configured fields resolve to a non-empty username and a password
///   string, or it fails with 400.
///
/// The verifier's verdict then becomes a success, a status-less failure, or
/// an error. A panicking verifier is reported as an error.
pub struct JsonStrategy<U> {
    config: StrategyConfig,
    verifier: Arc<dyn Verifier<U>>,
}

impl<U: Send + 'static> JsonStrategy<U> {
    /// Starts a builder with the default configuration.
    pub fn builder() -> JsonStrategyBuilder<U> {
        JsonStrategyBuilder {
            config: StrategyConfig::default(),
            verifier: None,
        }
    }

    /// Creates a strategy from a configuration and a verifier.
    pub fn new(config: StrategyConfig, verifier: impl Verifier<U>) -> Self {
        Self {
            config: config.normalized(),
            verifier: Arc::new(verifier),
        }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Pulls the credentials out of the body, or `None` if they are unusable.
    fn extract(&self, request: &dyn CredentialRequest) -> Option<Credentials> {
        let body = request.body()?;
        let username = lookup(body, &self.config.username_field).and_then(Value::as_str)?;
        let password = lookup(body, &self.config.password_field).and_then(Value::as_str)?;

        if username.is_empty() || (password.is_empty() && !self.config.allow_empty_passwords) {
            return None;
        }
        Some(Credentials {
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }

    /// Calls the verifier, turning a panic into an error.
    ///
    /// The verifier's future is built inside the guarded block, so a panic
    /// before it returns is caught as well as one while it is polled.
    async fn dispatch(
        &self,
        request: &dyn CredentialRequest,
        credentials: &Credentials,
    ) -> Result<Verdict<U>, AuthError> {
        let request = self.config.pass_request_to_callback.then_some(request);
        match AssertUnwindSafe(async { self.verifier.verify(request, credentials).await })
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(payload) => Err(AuthError::Panicked(panic_message(payload.as_ref()))),
        }
    }
}

#[async_trait::async_trait]
impl<U: Send + 'static> Strategy for JsonStrategy<U> {
    type User = U;

    fn name(&self) -> &str {
        NAME
    }

    async fn authenticate(
        &self,
        request: &dyn CredentialRequest,
        options: &AuthenticateOptions,
        signals: Box<dyn Signals<U>>,
    ) {
        if !request
            .header("content-type")
            .is_some_and(content_type::is_json)
        {
            tracing::debug!(
                strategy = NAME,
                content_type = ?request.header("content-type"),
                "rejecting request with unacceptable content type",
            );
            signals.fail(
                Info::from_message(options.message_or(UNACCEPTABLE_CONTENT_TYPE)),
                Some(StatusCode::UNSUPPORTED_MEDIA_TYPE),
            );
            return;
        }

        let Some(credentials) = self.extract(request) else {
            tracing::debug!(strategy = NAME, "rejecting request with missing credentials");
            signals.fail(
                Info::from_message(options.message_or(MISSING_CREDENTIALS)),
                Some(StatusCode::BAD_REQUEST),
            );
            return;
        };

        match self.dispatch(request, &credentials).await {
            Ok(Verdict::Accepted { user, info }) => {
                tracing::debug!(strategy = NAME, username = %credentials.username, "credentials accepted");
                signals.success(user, info);
            }
            Ok(Verdict::Rejected { info }) => {
                tracing::debug!(strategy = NAME, username = %credentials.username, "credentials rejected");
                signals.fail(info, None);
            }
            Err(e) => {
                tracing::warn!(strategy = NAME, error = %e, "credential verification failed");
                signals.error(e);
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Builder for [`JsonStrategy`]. A verifier is required.
pub struct JsonStrategyBuilder<U> {
    config: StrategyConfig,
    verifier: Option<Arc<dyn Verifier<U>>>,
}

impl<U: Send + 'static> JsonStrategyBuilder<U> {
    /// Replaces the whole configuration, e.g. one loaded from a config file.
    pub fn config(mut self, config: StrategyConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the body path of the username.
    pub fn username_field(mut self, path: impl Into<String>) -> Self {
        self.config.username_field = path.into();
        self
    }

    /// Sets the body path of the password.
    pub fn password_field(mut self, path: impl Into<String>) -> Self {
        self.config.password_field = path.into();
        self
    }

    /// Passes the request to the verifier. Closure verifiers need
    /// [`verify_request_fn`](crate::strategy::verify_request_fn) to see it.
    pub fn pass_request_to_callback(mut self, enabled: bool) -> Self {
        self.config.pass_request_to_callback = enabled;
        self
    }

    /// Accepts `""` as a password.
    pub fn allow_empty_passwords(mut self, enabled: bool) -> Self {
        self.config.allow_empty_passwords = enabled;
        self
    }

    /// Sets the credential verifier.
    pub fn verifier(mut self, verifier: impl Verifier<U>) -> Self {
        self.verifier = Some(Arc::new(verifier));
        self
    }

    /// Builds the strategy. Fails if no verifier was set.
    pub fn build(self) -> Result<JsonStrategy<U>, AuthError> {
        let verifier = self.verifier.ok_or_else(|| {
            AuthError::Config("JsonStrategy requires a verify callback".into())
        })?;
        Ok(JsonStrategy {
            config: self.config.normalized(),
            verifier,
        })
    }
}
