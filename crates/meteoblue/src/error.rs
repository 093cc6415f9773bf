//! Error types for outbound Meteoblue requests.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors from the weather fetch path.
///
/// Cache uploads never produce an error for the caller; their failures are
/// logged and swallowed at the call site.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure, timeout, or an undecodable body.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("unexpected status {status} from {url}")]
    Status { status: StatusCode, url: String },
}
