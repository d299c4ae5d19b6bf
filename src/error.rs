//! Errors that can happen when talking to the remote task store
//!
//! Every variant is a kind of network failure: the request could not complete, or the server did not accept it.

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent, or its response could not be read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status code
    #[error("unexpected HTTP status code {status} for {url}")]
    UnexpectedStatus { status: StatusCode, url: url::Url },

    /// The URL of an endpoint could not be built
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A failure injected by a mocked source
    #[error("{0}")]
    Mocked(String),
}

pub type Result<T> = std::result::Result<T, Error>;
