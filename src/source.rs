//! Retrieval of the sign's config document and room name.
//!
//! Resources are addressed by file name (`config.json`, `room.txt`) relative
//! to a base location, which is either an HTTP(S) URL or a local directory.
//! HTTP requests carry a `version=<unix millis>` query parameter so kiosk
//! caches never hand back a stale copy.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use reqwest::Url;

use crate::error::LoadError;
use crate::sign::SignConfig;

/// Name of the configuration document.
pub const CONFIG_RESOURCE: &str = "config.json";
/// Name of the room-name text file.
pub const ROOM_RESOURCE: &str = "room.txt";
/// Text shown when the room name cannot be loaded.
pub const ROOM_FALLBACK: &str = "Room name not found";
/// Default timeout for one resource request.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Somewhere sign resources can be read from.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Fetch a resource body as text.
    async fn fetch_text(&self, name: &str) -> Result<String, LoadError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

/// Resources served over HTTP(S).
pub struct HttpSource {
    http: reqwest::Client,
    base: Url,
}

impl HttpSource {
    pub fn new(base: &str, timeout: Duration) -> Result<Self, LoadError> {
        let mut base =
            Url::parse(base).map_err(|e| LoadError::InvalidLocation(format!("{base}: {e}")))?;
        // Treat the base as a directory so `join` appends rather than replaces.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            http: build_http_client(timeout),
            base,
        })
    }
}

/// Build an HTTP client with timeout applied.
fn build_http_client(timeout: Duration) -> reqwest::Client {
    // Fall back to reqwest defaults if builder creation fails for any reason.
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Resolve `name` against `base` and append the cache-busting version.
pub fn versioned_url(base: &Url, name: &str, millis: u128) -> Result<Url, LoadError> {
    let mut url = base
        .join(name)
        .map_err(|e| LoadError::InvalidLocation(format!("{name}: {e}")))?;
    url.query_pairs_mut()
        .append_pair("version", &millis.to_string());
    Ok(url)
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

#[async_trait]
impl ResourceSource for HttpSource {
    async fn fetch_text(&self, name: &str) -> Result<String, LoadError> {
        let url = versioned_url(&self.base, name, unix_millis())?;
        tracing::debug!(%url, "fetching resource");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

// ---------------------------------------------------------------------------
// Local directory
// ---------------------------------------------------------------------------

/// Resources read from a local directory.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ResourceSource for DirSource {
    async fn fetch_text(&self, name: &str) -> Result<String, LoadError> {
        let path = self.root.join(name);
        tracing::debug!(path = %path.display(), "reading resource");
        Ok(tokio::fs::read_to_string(&path).await?)
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Pick a source for a `--source` argument: URLs go over HTTP, anything
/// else is a directory.
pub fn source_from_location(
    location: &str,
    timeout: Duration,
) -> Result<Box<dyn ResourceSource>, LoadError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, timeout)?))
    } else {
        Ok(Box::new(DirSource::new(location)))
    }
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Fetch and parse the sign configuration. Any failure is fatal for the page.
pub async fn load_sign_config<S: ResourceSource + ?Sized>(
    source: &S,
) -> Result<SignConfig, LoadError> {
    let body = source.fetch_text(CONFIG_RESOURCE).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Room name as shown on the sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomName {
    Loaded(String),
    Missing,
}

impl RoomName {
    pub fn display_text(&self) -> &str {
        match self {
            Self::Loaded(name) => name,
            Self::Missing => ROOM_FALLBACK,
        }
    }
}

/// Fetch the room name. Failures only affect the room slot.
pub async fn load_room_name<S: ResourceSource + ?Sized>(source: &S) -> RoomName {
    match source.fetch_text(ROOM_RESOURCE).await {
        Ok(body) => RoomName::Loaded(body.trim().to_string()),
        Err(err) => {
            tracing::warn!(source = %source.describe(), %err, "could not load room name");
            RoomName::Missing
        }
    }
}
