//! Shared test fixtures for config, source, and page test modules.

use async_trait::async_trait;
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::LoadError;
use crate::render::{RenderTarget, Slot};
use crate::sign::SignConfig;
use crate::source::ResourceSource;

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("nowshowing-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    /// Root directory path for this fixture.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// A complete extended-variant `config.json`.
pub fn sign_config_json_fixture() -> String {
    json!({
        "colors": {
            "background_color": "#223344",
            "title_color": "#FFEECC",
            "artist_color": "#ccddee",
            "bartender_color": "aabbcc",
            "label_color": "#999999",
            "panel_background": "#101010",
            "footer_background": "#EEEEEE"
        },
        "fonts": {
            "artist_font": "Caveat",
            "bartender_font": "Lobster",
            "painting_font": "DM Serif Text"
        },
        "painting_name": "Starry Night",
        "artist_name": "Vincent van Gogh",
        "bartender_name": "Sam",
        "painting_source": "images/starry-night.jpg",
        "bartender_enabled": true
    })
    .to_string()
}

/// [`sign_config_json_fixture`], parsed.
pub fn sign_config_fixture() -> SignConfig {
    serde_json::from_str(&sign_config_json_fixture()).expect("fixture must parse")
}

/// Host page providing every slot, with some surrounding markup.
pub const HOST_PAGE_FIXTURE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Now Showing</title>
  <style id="dynamic-styles"></style>
</head>
<body class="sign">
  <div class="left-panel"><img class="painting-image" src="placeholder.png" alt="Painting"></div>
  <main>
    <h1 id="painting-title" class="painting-title">Loading…</h1>
    <p class="label">Artist</p>
    <p id="artist-name" class="artist"></p>
    <div id="bartender-container" style="display: none; margin-top: 1rem">
      <p class="label">Bartender</p>
      <p id="bartender-name" class="bartender"></p>
    </div>
  </main>
  <footer id="footer-bar" class="footer-bar">
    <span id="room-name"></span>
    <span id="current-time"></span>
  </footer>
  <script>if (a < b && c) { refresh(); }</script>
</body>
</html>
"#;

/// In-memory source keyed by resource name; unknown names fail with 404.
#[derive(Debug, Default)]
pub struct StaticSource {
    bodies: BTreeMap<String, Result<String, u16>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, body: &str) -> Self {
        self.bodies.insert(name.to_string(), Ok(body.to_string()));
        self
    }

    pub fn failing(mut self, name: &str, status: u16) -> Self {
        self.bodies.insert(name.to_string(), Err(status));
        self
    }
}

#[async_trait]
impl ResourceSource for StaticSource {
    async fn fetch_text(&self, name: &str) -> Result<String, LoadError> {
        match self.bodies.get(name) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(LoadError::Status(*status)),
            None => Err(LoadError::Status(404)),
        }
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

/// Target that records every write, for checking what a pass touched.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    missing: BTreeSet<Slot>,
    pub writes: Vec<(Slot, String)>,
    pub body: Option<String>,
}

impl RecordingTarget {
    /// A page providing every slot except `missing`.
    pub fn without(missing: &[Slot]) -> Self {
        Self {
            missing: missing.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn writes_to(&self, slot: Slot) -> usize {
        self.writes.iter().filter(|(s, _)| *s == slot).count()
    }

    pub fn body_replaced(&self) -> bool {
        self.body.is_some()
    }
}

impl RenderTarget for RecordingTarget {
    fn has_slot(&self, slot: Slot) -> bool {
        !self.missing.contains(&slot)
    }

    fn set_text(&mut self, slot: Slot, text: &str) {
        self.writes.push((slot, format!("text={text}")));
    }

    fn set_attribute(&mut self, slot: Slot, name: &str, value: &str) {
        self.writes.push((slot, format!("{name}={value}")));
    }

    fn set_style(&mut self, slot: Slot, property: &str, value: &str) {
        self.writes.push((slot, format!("style.{property}={value}")));
    }

    fn replace_body(&mut self, text: &str) {
        self.body = Some(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/room.txt", "Gallery 4");
        assert_eq!(fs::read_to_string(file).unwrap(), "Gallery 4");
    }

    #[test]
    fn config_fixture_parses() {
        assert_eq!(sign_config_fixture().bartender_name, "Sam");
    }

    #[tokio::test]
    async fn static_source_serves_and_fails() {
        let source = StaticSource::new()
            .with("room.txt", "A")
            .failing("config.json", 500);
        assert_eq!(source.fetch_text("room.txt").await.unwrap(), "A");
        assert!(matches!(
            source.fetch_text("config.json").await,
            Err(LoadError::Status(500))
        ));
        assert!(matches!(
            source.fetch_text("other").await,
            Err(LoadError::Status(404))
        ));
    }
}
