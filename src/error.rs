//! Error types for the Hostaway client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostawayError {
    /// Missing credentials, or the token endpoint did not hand out a token.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Any failure of an authenticated request.
    #[error("Request failed: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl HostawayError {
    /// Upstream HTTP status, when the failure came with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            HostawayError::Api { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, HostawayError::Authentication(_))
    }
}

impl From<reqwest::Error> for HostawayError {
    fn from(error: reqwest::Error) -> Self {
        HostawayError::Api {
            status: error.status().map(|status| status.as_u16()),
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HostawayError>;
