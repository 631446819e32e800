//! Error type shared by every client operation.

use thiserror::Error;

/// Errors returned by the Zoho Mail client.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure: connection, timeout, TLS, proxy or request building.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a status other than 200.
    ///
    /// Also used when an upload response carries a failing embedded status;
    /// in that case the code is the HTTP one, not the embedded one.
    #[error("Zoho Mail responded with status {0}")]
    Status(u16),

    /// The response body was not valid JSON for the expected record.
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// The response parsed but a required field was absent or empty.
    #[error("Required field not found in response: {0}")]
    FieldNotFound(&'static str),

    /// A required environment variable was unset or empty.
    #[error("Missing required config: {0}")]
    MissingConfig(&'static str),
}

impl Error {
    /// The status code carried by a protocol error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status(code) => Some(*code),
            _ => None,
        }
    }

    /// Whether the provider could not be reached at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Request(_))
    }
}
