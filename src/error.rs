//! Error types for browser sessions and startup configuration.
//!
//! Field-level and entity-level extraction misses are not errors: the
//! resolver returns `None` and assemblers return `Option`. Only failures of
//! the browser session itself surface here.

use thirtyfour::error::WebDriverError;

/// Failure of the browser session. Fatal to the flow that hit it.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The WebDriver endpoint could not start a browser.
    #[error("Failed to launch browser via {endpoint}: {reason}")]
    Launch { endpoint: String, reason: String },

    /// Credentials were submitted but the site kept us on the login or
    /// checkpoint page.
    #[error("Login rejected, still at {url}")]
    LoginRejected { url: String },

    /// A page could not be loaded.
    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// A required element never appeared.
    #[error("Timed out waiting for {what}")]
    Timeout { what: String },

    /// A script ran but returned something other than what was asked for.
    #[error("Script `{script}` returned an unexpected value")]
    Script { script: String },

    #[error("Browser session already closed")]
    Closed,

    #[error("WebDriver error: {0}")]
    WebDriver(#[from] WebDriverError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Configuration problems detected before any browser is launched.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set. Set it with: export {0}=...")]
    MissingCredential(&'static str),
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;
