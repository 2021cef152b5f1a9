//! Terminal signals a strategy reports to its host.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::oneshot;

use crate::error::AuthError;

/// Free-form details attached to a success or failure, e.g. `{"scope": "read"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Info(Map<String, Value>);

impl Info {
    pub fn new() -> Self {
        Self::default()
    }

    /// An info object holding only `{"message": message}`.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self::new().with("message", Value::String(message.into()))
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The `message` entry, when it is a string.
    pub fn message(&self) -> Option<&str> {
        self.get("message").and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Info {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// The host capability through which a strategy ends a request.
///
/// Each method consumes the capability, so a strategy can report at most
/// one outcome per request.
pub trait Signals<U>: Send {
    /// The request is authenticated as `user`.
    fn success(self: Box<Self>, user: U, info: Info);

    /// Authentication failed. `status` is set for malformed requests and
    /// left empty when the verifier rejected the credentials.
    fn fail(self: Box<Self>, info: Info, status: Option<StatusCode>);

    /// Authentication could not be completed.
    fn error(self: Box<Self>, error: AuthError);
}

/// A reported outcome, for hosts that want a value instead of callbacks.
#[derive(Debug)]
pub enum Outcome<U> {
    Success { user: U, info: Info },
    Fail { info: Info, status: Option<StatusCode> },
    Error(AuthError),
}

impl<U> Outcome<U> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The response status a host sends by default for this outcome.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Success { .. } => StatusCode::OK,
            Self::Fail {
                status: Some(status),
                ..
            } => *status,
            Self::Fail { status: None, .. } => StatusCode::UNAUTHORIZED,
            Self::Error(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the user on success.
    pub fn user(&self) -> Option<&U> {
        match self {
            Self::Success { user, .. } => Some(user),
            _ => None,
        }
    }

    /// Returns the attached info for success and failure.
    pub fn info(&self) -> Option<&Info> {
        match self {
            Self::Success { info, .. } | Self::Fail { info, .. } => Some(info),
            Self::Error(_) => None,
        }
    }
}

/// Signals that forward the outcome over a oneshot channel.
pub struct OutcomeSender<U>(oneshot::Sender<Outcome<U>>);

/// Creates boxed signals paired with the receiver of their outcome.
pub fn outcome_channel<U: Send + 'static>() -> (Box<dyn Signals<U>>, oneshot::Receiver<Outcome<U>>) {
    let (tx, rx) = oneshot::channel();
    (Box::new(OutcomeSender(tx)), rx)
}

impl<U: Send> OutcomeSender<U> {
    fn send(self, outcome: Outcome<U>) {
        if self.0.send(outcome).is_err() {
            tracing::debug!("outcome receiver dropped before the strategy reported");
        }
    }
}

impl<U: Send> Signals<U> for OutcomeSender<U> {
    fn success(self: Box<Self>, user: U, info: Info) {
        (*self).send(Outcome::Success { user, info });
    }

    fn fail(self: Box<Self>, info: Info, status: Option<StatusCode>) {
        (*self).send(Outcome::Fail { info, status });
    }

    fn error(self: Box<Self>, error: AuthError) {
        (*self).send(Outcome::Error(error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn info_builders() {
        let info = Info::new().with("scope", "read");
        assert_eq!(info.get("scope"), Some(&json!("read")));
        assert_eq!(info.message(), None);

        let info = Info::from_message("Missing credentials");
        assert_eq!(info.message(), Some("Missing credentials"));
        assert_eq!(serde_json::to_value(&info).unwrap(), json!({ "message": "Missing credentials" }));
    }

    #[test]
    fn status_codes() {
        let ok: Outcome<()> = Outcome::Success { user: (), info: Info::new() };
        assert_eq!(ok.status_code(), StatusCode::OK);

        let bad: Outcome<()> = Outcome::Fail {
            info: Info::new(),
            status: Some(StatusCode::UNSUPPORTED_MEDIA_TYPE),
        };
        assert_eq!(bad.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let rejected: Outcome<()> = Outcome::Fail { info: Info::new(), status: None };
        assert_eq!(rejected.status_code(), StatusCode::UNAUTHORIZED);

        let err: Outcome<()> = Outcome::Error(AuthError::Abandoned);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.info().is_none());
    }

    #[tokio::test]
    async fn channel_delivers_single_outcome() {
        let (signals, rx) = outcome_channel::<&str>();
        signals.success("johndoe", Info::new().with("scope", "read"));

        let outcome = rx.await.unwrap();
        assert!(outcome.is_success());
        assert_eq!(outcome.user(), Some(&"johndoe"));
    }

    #[tokio::test]
    async fn dropped_signals_close_channel() {
        let (signals, rx) = outcome_channel::<()>();
        drop(signals);
        assert!(rx.await.is_err());
    }
}
