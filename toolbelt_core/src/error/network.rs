//! Network related error types

use thiserror::Error;

/// Errors raised while probing a URL
#[derive(Error, Debug)]
pub enum NetworkError {
    /// The URL could not be parsed
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The redirect chain exceeded the configured limit
    #[error("Too many redirects resolving '{url}' (limit {limit})")]
    TooManyRedirects { url: String, limit: usize },

    /// The request did not complete in time
    #[error("Request timed out: {url}")]
    Timeout { url: String },

    /// Any other transport or HTTP failure
    #[error("Request failed: {message}")]
    Request { message: String },
}

impl NetworkError {
    /// Create an invalid URL error
    pub fn invalid_url(url: &str, reason: &str) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a redirect limit error
    pub fn too_many_redirects(url: &str, limit: usize) -> Self {
        Self::TooManyRedirects {
            url: url.to_string(),
            limit,
        }
    }

    /// Create a generic request error
    pub fn request(message: &str) -> Self {
        Self::Request {
            message: message.to_string(),
        }
    }

    /// Classify a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());

        if err.is_timeout() {
            Self::Timeout { url }
        } else if err.is_redirect() {
            Self::Request {
                message: format!("redirect policy rejected '{url}': {err}"),
            }
        } else if err.is_builder() {
            Self::InvalidUrl {
                url,
                reason: err.to_string(),
            }
        } else {
            Self::request(&err.to_string())
        }
    }
}
