//! jsonauth — username/password authentication for JSON request bodies.
//!
//! This crate provides a single authentication strategy for pluggable
//! middleware pipelines. The host supplies a parsed request and a set of
//! [`Signals`]; the strategy checks the content type, pulls the credentials
//! out of the body and asks an application [`Verifier`] whether they are
//! valid.
//!
//! # Architecture
//!
//! - **`lookup`** — Dotted/bracketed field paths over JSON values
//! - **`request`** — The `CredentialRequest` view of an inbound request
//! - **`strategy`** — The `Strategy` trait, `JsonStrategy`, verifiers and signals
//! - **`error`** — `AuthError`
//!
//! # Example
//!
//! ```
//! use jsonauth::{AuthenticateOptions, Credentials, JsonRequest, JsonStrategy, Strategy, Verdict, verify_fn};
//! use serde_json::json;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let strategy = JsonStrategy::builder()
//!     .verifier(verify_fn(|c: Credentials| async move {
//!         if c.username == "johndoe" && c.password == "secret" {
//!             Ok(Verdict::accepted("1234"))
//!         } else {
//!             Ok(Verdict::rejected())
//!         }
//!     }))
//!     .build()?;
//!
//! let req = JsonRequest::new()
//!     .with_header("Content-Type", "application/json")
//!     .with_body(json!({ "username": "johndoe", "password": "secret" }));
//!
//! let outcome = strategy.outcome(&req, &AuthenticateOptions::default()).await;
//! assert_eq!(outcome.user(), Some(&"1234"));
//! # Ok::<(), jsonauth::AuthError>(())
//! # }).unwrap();
//! ```

pub mod error;
pub mod lookup;
pub mod request;
pub mod strategy;

pub use error::AuthError;
pub use lookup::lookup;
pub use request::{CredentialRequest, JsonRequest};
pub use strategy::{
    AuthenticateOptions, Credentials, Info, JsonStrategy, JsonStrategyBuilder, Outcome, Signals,
    Strategy, StrategyConfig, Verdict, Verifier, verify_fn, verify_request_fn,
};
