//! Strategy configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_USERNAME_FIELD: &str = "username";
pub const DEFAULT_PASSWORD_FIELD: &str = "password";

/// Where credentials live in the body and how the verifier is invoked.
///
/// Deserializes from camelCase keys. The older `usernameProp`,
/// `passwordProp` and `passReqToCallback` spellings are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StrategyConfig {
    /// Path of the username inside the body.
    #[serde(alias = "usernameProp")]
    pub username_field: String,
    /// Path of the password inside the body.
    #[serde(alias = "passwordProp")]
    pub password_field: String,
    /// Hand the request to the verifier alongside the credentials.
    #[serde(alias = "passReqToCallback")]
    pub pass_request_to_callback: bool,
    /// Accept `""` as a password. A missing password is still rejected.
    pub allow_empty_passwords: bool,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            username_field: DEFAULT_USERNAME_FIELD.to_string(),
            password_field: DEFAULT_PASSWORD_FIELD.to_string(),
            pass_request_to_callback: false,
            allow_empty_passwords: false,
        }
    }
}

impl StrategyConfig {
    /// Replaces empty field paths with the defaults.
    pub(crate) fn normalized(mut self) -> Self {
        if self.username_field.is_empty() {
            self.username_field = DEFAULT_USERNAME_FIELD.to_string();
        }
        if self.password_field.is_empty() {
            self.password_field = DEFAULT_PASSWORD_FIELD.to_string();
        }
        self
    }
}
