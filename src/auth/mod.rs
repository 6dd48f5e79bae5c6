//! Credential resolution for the Alpaca API.
//!
//! A client authenticates in exactly one of two ways:
//!
//! 1. **API key pair** - an `api_key` with its matching `secret_key`, sent as
//!    two headers or, in basic-auth mode, as one `Authorization: Basic` header
//! 2. **OAuth** - a bearer `oauth_token`
//!
//! Explicit arguments always win. When none are given, the credentials are
//! read from a [`CredentialSource`], by default the process environment
//! (after loading a `.env` file if present).
//!
//! ```no_run
//! use paca_rs::auth::{Credentials, EnvCredentials};
//!
//! # fn example() -> paca_rs::Result<()> {
//! // Explicit key pair
//! let creds = Credentials::resolve(Some("AKXXXX"), Some("secret"), None, &EnvCredentials)?;
//!
//! // Nothing explicit: falls back to API_KEY / SECRET_KEY / OAUTH_TOKEN
//! let creds = Credentials::resolve(None, None, None, &EnvCredentials)?;
//! # Ok(())
//! # }
//! ```

mod credentials;

pub use credentials::{
    AuthMethod, CredentialSource, Credentials, EnvCredentials, StaticCredentials, ENV_API_KEY,
    ENV_OAUTH_TOKEN, ENV_SECRET_KEY,
};
