//! Sign configuration data model.
//!
//! `config.json` is authored by hand next to the sign, so every field is
//! optional on the wire. Color and font values are resolved through
//! [`color`] and [`fonts`] before they ever reach generated style text.

pub mod color;
pub mod fonts;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use color::{luminance, HexColor};
pub use fonts::{resolve_font, FALLBACK_FONT_STACK};

/// One sign instance: colors, fonts, and the strings it shows.
///
/// Any well-formed JSON object decodes. Values of the wrong type are
/// coerced or dropped field by field; only malformed JSON fails the load.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct SignConfig {
    #[serde(default, deserialize_with = "section_or_default")]
    pub colors: Colors,
    #[serde(default, deserialize_with = "section_or_default")]
    pub fonts: Fonts,
    #[serde(default, deserialize_with = "loose_text")]
    pub painting_name: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub artist_name: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub bartender_name: String,
    /// Image URL or path for the painting.
    #[serde(default, deserialize_with = "string_or_none")]
    pub painting_source: Option<String>,
    /// Absent means "no opinion"; see [`BartenderPolicy`]. Only a JSON
    /// boolean counts, so `"false"` is no opinion too.
    #[serde(default, deserialize_with = "bool_or_none")]
    pub bartender_enabled: Option<bool>,
}

/// Raw color roles as written in the config file.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Colors {
    #[serde(default, deserialize_with = "string_or_none")]
    pub background_color: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub title_color: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub artist_color: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub bartender_color: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub label_color: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub panel_background: Option<String>,
    /// Only present on signs with a footer bar.
    #[serde(default, deserialize_with = "string_or_none")]
    pub footer_background: Option<String>,
}

/// Raw font roles as written in the config file.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Fonts {
    #[serde(default, deserialize_with = "string_or_none")]
    pub artist_font: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub bartender_font: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub painting_font: Option<String>,
}

/// Shown text: `null` is empty, other scalars keep their JSON spelling.
fn loose_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}

fn string_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Null => None,
        other => {
            tracing::warn!(value = %other, "ignoring non-string config value");
            None
        }
    })
}

fn bool_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_bool())
}

/// A nested section that is not an object reads as empty.
fn section_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        section @ Value::Object(_) => T::deserialize(section).map_err(serde::de::Error::custom),
        _ => Ok(T::default()),
    }
}

/// Named color role, used for defaults and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    Background,
    Title,
    Artist,
    Bartender,
    Label,
    PanelBackground,
    FooterBackground,
}

impl ColorRole {
    /// Config key for this role.
    pub fn key(self) -> &'static str {
        match self {
            Self::Background => "background_color",
            Self::Title => "title_color",
            Self::Artist => "artist_color",
            Self::Bartender => "bartender_color",
            Self::Label => "label_color",
            Self::PanelBackground => "panel_background",
            Self::FooterBackground => "footer_background",
        }
    }

    /// Color substituted when the configured value is missing or malformed.
    pub fn default_color(self) -> HexColor {
        match self {
            Self::Background => HexColor::rgb(0x1a, 0x1a, 0x1a),
            Self::Title | Self::Artist | Self::Bartender => HexColor::rgb(0xff, 0xff, 0xff),
            Self::Label => HexColor::rgb(0xcc, 0xcc, 0xcc),
            Self::PanelBackground => HexColor::rgb(0x00, 0x00, 0x00),
            Self::FooterBackground => HexColor::rgb(0x11, 0x11, 0x11),
        }
    }
}

impl Colors {
    fn raw(&self, role: ColorRole) -> Option<&str> {
        let value = match role {
            ColorRole::Background => &self.background_color,
            ColorRole::Title => &self.title_color,
            ColorRole::Artist => &self.artist_color,
            ColorRole::Bartender => &self.bartender_color,
            ColorRole::Label => &self.label_color,
            ColorRole::PanelBackground => &self.panel_background,
            ColorRole::FooterBackground => &self.footer_background,
        };
        value.as_deref()
    }

    /// Resolve a role to a validated color, substituting the role default.
    pub fn resolve(&self, role: ColorRole) -> HexColor {
        let Some(raw) = self.raw(role) else {
            tracing::debug!(role = role.key(), "color not configured, using default");
            return role.default_color();
        };
        match HexColor::parse(raw) {
            Ok(color) => color,
            Err(err) => {
                tracing::warn!(role = role.key(), value = raw, %err, "rejecting color value");
                role.default_color()
            }
        }
    }

    /// The footer color, when this sign has a footer bar configured.
    pub fn footer(&self) -> Option<HexColor> {
        self.footer_background
            .as_ref()
            .map(|_| self.resolve(ColorRole::FooterBackground))
    }
}

/// How a missing `bartender_enabled` flag is interpreted.
///
/// Two deployed versions of the sign disagree here, so the choice is made
/// explicitly by whoever runs the display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BartenderPolicy {
    /// Visible unless the flag is explicitly `false`.
    #[default]
    ShownUnlessDisabled,
    /// Hidden unless the flag is explicitly `true`.
    HiddenUnlessEnabled,
}

impl BartenderPolicy {
    pub fn is_visible(self, flag: Option<bool>) -> bool {
        match self {
            Self::ShownUnlessDisabled => flag != Some(false),
            Self::HiddenUnlessEnabled => flag == Some(true),
        }
    }
}
