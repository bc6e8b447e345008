use std::path::PathBuf;

use reqwest::StatusCode;

/// Fatal failures while getting the timetable markup. Nothing is written when
/// one of these aborts a run.
#[derive(Debug)]
pub enum FetchError {
    /// Connection, TLS, timeout or body read failure.
    Network { url: String, source: reqwest::Error },
    /// The server answered, but not with a success status.
    Status { url: String, status: StatusCode },
    /// A saved page could not be read.
    Io { path: PathBuf, source: std::io::Error },
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Network { url, .. } => write!(f, "request to {url} failed"),
            FetchError::Status { url, status } => write!(f, "{url} answered with {status}"),
            FetchError::Io { path, .. } => write!(f, "could not read {}", path.display()),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Network { source, .. } => Some(source),
            FetchError::Status { .. } => None,
            FetchError::Io { source, .. } => Some(source),
        }
    }
}
