//! API credentials and the sources they are read from.

use std::collections::HashMap;
use std::sync::Once;

use secrecy::{ExposeSecret, SecretString};

use crate::{Error, Result};

/// Environment variable holding the API key id.
pub const ENV_API_KEY: &str = "API_KEY";
/// Environment variable holding the API secret key.
pub const ENV_SECRET_KEY: &str = "SECRET_KEY";
/// Environment variable holding an OAuth token.
pub const ENV_OAUTH_TOKEN: &str = "OAUTH_TOKEN";

/// A provider of configuration values, consulted when a client is built
/// without explicit credentials.
pub trait CredentialSource {
    /// Look up a variable by name.
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads credentials from the process environment.
///
/// The first lookup loads a `.env` file from the working directory (or any
/// parent) if one exists; variables already set in the environment take
/// precedence over the file.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn var(&self, name: &str) -> Option<String> {
        static DOTENV: Once = Once::new();
        DOTENV.call_once(|| {
            if let Ok(path) = dotenvy::dotenv() {
                tracing::debug!(path = %path.display(), "Loaded credentials file");
            }
        });
        std::env::var(name).ok()
    }
}

/// A fixed set of variables, for tests and for embedding applications that
/// manage their own configuration.
///
/// # Example
///
/// ```
/// use paca_rs::auth::{Credentials, StaticCredentials, ENV_OAUTH_TOKEN};
///
/// let source = StaticCredentials::new().with(ENV_OAUTH_TOKEN, "token");
/// let creds = Credentials::resolve(None, None, None, &source).unwrap();
/// assert!(creds.is_oauth());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    vars: HashMap<String, String>,
}

impl StaticCredentials {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl CredentialSource for StaticCredentials {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// The authentication method a set of credentials resolved to.
#[derive(Clone)]
pub enum AuthMethod {
    /// API key id with its secret key
    KeyPair {
        /// API key id
        api_key: SecretString,
        /// Secret key paired with `api_key`
        secret_key: SecretString,
    },
    /// OAuth bearer token
    OAuth {
        /// The bearer token
        token: SecretString,
    },
}

/// Validated credentials for one client.
///
/// Holds either an API key pair or an OAuth token, never both and never a
/// lone key. Immutable once built.
#[derive(Clone)]
pub struct Credentials {
    method: AuthMethod,
}

impl Credentials {
    /// Validate an explicit combination of credentials.
    ///
    /// Empty strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if:
    /// - nothing is supplied
    /// - `oauth_token` is supplied together with `api_key` or `secret_key`
    /// - only one half of the key pair is supplied
    pub fn validate(
        api_key: Option<&str>,
        secret_key: Option<&str>,
        oauth_token: Option<&str>,
    ) -> Result<Self> {
        let method = match (present(api_key), present(secret_key), present(oauth_token)) {
            (None, None, None) => {
                return Err(Error::config("You must supply a method of authentication"));
            }
            (None, None, Some(token)) => AuthMethod::OAuth {
                token: secret(token),
            },
            (_, _, Some(_)) => {
                return Err(Error::config(
                    "Either an oauth_token or an api_key may be supplied, but not both",
                ));
            }
            (Some(key), Some(sec), None) => AuthMethod::KeyPair {
                api_key: secret(key),
                secret_key: secret(sec),
            },
            (Some(_), None, None) | (None, Some(_), None) => {
                return Err(Error::config(
                    "You must provide both the `api_key` and `secret_key`",
                ));
            }
        };
        Ok(Self { method })
    }

    /// Resolve credentials from explicit arguments, falling back to `source`
    /// when none are given.
    ///
    /// The fallback happens only when all three arguments are absent; a
    /// partial explicit combination is validated as-is.
    pub fn resolve(
        api_key: Option<&str>,
        secret_key: Option<&str>,
        oauth_token: Option<&str>,
        source: &dyn CredentialSource,
    ) -> Result<Self> {
        let explicit = [api_key, secret_key, oauth_token]
            .into_iter()
            .any(|v| present(v).is_some());
        if explicit {
            return Self::validate(api_key, secret_key, oauth_token);
        }

        let api_key = source.var(ENV_API_KEY);
        let secret_key = source.var(ENV_SECRET_KEY);
        let oauth_token = source.var(ENV_OAUTH_TOKEN);
        Self::validate(
            api_key.as_deref(),
            secret_key.as_deref(),
            oauth_token.as_deref(),
        )
    }

    /// Resolve credentials from the process environment only.
    pub fn from_env() -> Result<Self> {
        Self::resolve(None, None, None, &EnvCredentials)
    }

    /// Shorthand for an API key pair.
    pub fn key_pair(api_key: &str, secret_key: &str) -> Result<Self> {
        Self::validate(Some(api_key), Some(secret_key), None)
    }

    /// Shorthand for an OAuth token.
    pub fn oauth(token: &str) -> Result<Self> {
        Self::validate(None, None, Some(token))
    }

    /// The resolved authentication method.
    pub fn method(&self) -> &AuthMethod {
        &self.method
    }

    /// Returns `true` if these are OAuth credentials.
    pub fn is_oauth(&self) -> bool {
        matches!(self.method, AuthMethod::OAuth { .. })
    }

    /// The API key id, if this is a key pair.
    pub fn api_key(&self) -> Option<&str> {
        match &self.method {
            AuthMethod::KeyPair { api_key, .. } => Some(api_key.expose_secret()),
            AuthMethod::OAuth { .. } => None,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let method = match self.method {
            AuthMethod::KeyPair { .. } => "key_pair",
            AuthMethod::OAuth { .. } => "oauth",
        };
        f.debug_struct("Credentials")
            .field("method", &method)
            .field("secrets", &"[REDACTED]")
            .finish()
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn secret(value: &str) -> SecretString {
    SecretString::from(value.to_string())
}
