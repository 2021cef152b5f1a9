//! The application-supplied credential check.

use std::fmt;
use std::future::Future;

use crate::error::AuthError;
use crate::request::CredentialRequest;
use crate::strategy::signals::Info;

/// A username/password pair extracted from the request body.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// What the verifier decided about a set of credentials.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict<U> {
    Accepted { user: U, info: Info },
    Rejected { info: Info },
}

impl<U> Verdict<U> {
    pub fn accepted(user: U) -> Self {
        Self::Accepted {
            user,
            info: Info::new(),
        }
    }

    pub fn rejected() -> Self {
        Self::Rejected { info: Info::new() }
    }

    /// Replaces the info carried by this verdict.
    pub fn with_info(self, info: Info) -> Self {
        match self {
            Self::Accepted { user, .. } => Self::Accepted { user, info },
            Self::Rejected { .. } => Self::Rejected { info },
        }
    }
}

/// Decides whether credentials identify a user.
///
/// Return `Ok(Verdict::Rejected { .. })` for wrong credentials and `Err` only
/// when the check itself could not run (store unavailable and the like).
#[async_trait::async_trait]
pub trait Verifier<U>: Send + Sync + 'static {
    /// `request` is `Some` only when the strategy is configured to pass it.
    async fn verify(
        &self,
        request: Option<&dyn CredentialRequest>,
        credentials: &Credentials,
    ) -> Result<Verdict<U>, AuthError>;
}

/// A [`Verifier`] backed by an async closure over the credentials.
pub struct FnVerifier<F>(F);

/// Wraps `f` as a verifier that ignores the request.
pub fn verify_fn<U, F, Fut>(f: F) -> FnVerifier<F>
where
    F: Fn(Credentials) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Verdict<U>, AuthError>> + Send + 'static,
{
    FnVerifier(f)
}

#[async_trait::async_trait]
impl<U, F, Fut> Verifier<U> for FnVerifier<F>
where
    U: Send + 'static,
    F: Fn(Credentials) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Verdict<U>, AuthError>> + Send + 'static,
{
    async fn verify(
        &self,
        _request: Option<&dyn CredentialRequest>,
        credentials: &Credentials,
    ) -> Result<Verdict<U>, AuthError> {
        (self.0)(credentials.clone()).await
    }
}

/// A [`Verifier`] backed by a closure that also receives the request.
pub struct RequestFnVerifier<F>(F);

/// Wraps `f` as a verifier that sees the request when the strategy passes it.
///
/// The request is borrowed only for the call itself; read what the check
/// needs before returning the future.
pub fn verify_request_fn<U, F, Fut>(f: F) -> RequestFnVerifier<F>
where
    F: Fn(Option<&dyn CredentialRequest>, Credentials) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Verdict<U>, AuthError>> + Send + 'static,
{
    RequestFnVerifier(f)
}

#[async_trait::async_trait]
impl<U, F, Fut> Verifier<U> for RequestFnVerifier<F>
where
    U: Send + 'static,
    F: Fn(Option<&dyn CredentialRequest>, Credentials) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Verdict<U>, AuthError>> + Send + 'static,
{
    async fn verify(
        &self,
        request: Option<&dyn CredentialRequest>,
        credentials: &Credentials,
    ) -> Result<Verdict<U>, AuthError> {
        (self.0)(request, credentials.clone()).await
    }
}
