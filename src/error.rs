//! Unified error types for the sign renderer.

use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// LoadError
// ---------------------------------------------------------------------------

/// Errors when retrieving or decoding a sign resource.
#[derive(Debug)]
pub enum LoadError {
    /// Network / reqwest-level error.
    Http(reqwest::Error),
    /// Non-2xx status from the resource server.
    Status(u16),
    /// Local filesystem read failure.
    Io(std::io::Error),
    /// Body was not a valid configuration document.
    Parse(serde_json::Error),
    /// The resource location could not be turned into a request.
    InvalidLocation(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "http: {e}"),
            Self::Status(code) => write!(f, "status {code}"),
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Parse(e) => write!(f, "json: {e}"),
            Self::InvalidLocation(msg) => write!(f, "invalid location: {msg}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<reqwest::Error> for LoadError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// PageError
// ---------------------------------------------------------------------------

/// Errors reading the host page or writing the rendered output.
#[derive(Debug)]
pub enum PageError {
    Read(PathBuf, std::io::Error),
    Write(PathBuf, std::io::Error),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(path, e) => write!(f, "read {}: {e}", path.display()),
            Self::Write(path, e) => write!(f, "write {}: {e}", path.display()),
        }
    }
}

impl std::error::Error for PageError {}

// ---------------------------------------------------------------------------
// DisplayError — top-level
// ---------------------------------------------------------------------------

/// Top-level error type for a display run.
#[derive(Debug)]
pub enum DisplayError {
    Load(LoadError),
    Page(PageError),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "load: {e}"),
            Self::Page(e) => write!(f, "page: {e}"),
        }
    }
}

impl std::error::Error for DisplayError {}

impl From<LoadError> for DisplayError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

impl From<PageError> for DisplayError {
    fn from(e: PageError) -> Self {
        Self::Page(e)
    }
}
