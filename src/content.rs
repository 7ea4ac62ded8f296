//! Derived presentation values: contrast colors and title sizing.

use crate::sign::{ColorRole, HexColor, SignConfig};

/// Foreground color and footer border chosen for a background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contrast {
    /// Dark text for bright backgrounds.
    Dark,
    /// Light text for dim backgrounds.
    Light,
}

impl Contrast {
    pub fn from_luminance(luminance: f64) -> Self {
        if luminance > 0.5 {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn for_background(color: HexColor) -> Self {
        Self::from_luminance(color.luminance())
    }

    pub fn foreground(self) -> &'static str {
        match self {
            Self::Dark => "#1a1a1a",
            Self::Light => "#f5f5f5",
        }
    }

    pub fn border(self) -> &'static str {
        match self {
            Self::Dark => "2px solid rgba(0, 0, 0, 0.15)",
            Self::Light => "2px solid rgba(255, 255, 255, 0.35)",
        }
    }
}

/// Contrast for the room and clock text, which sit on the footer bar when
/// one is configured and on the page background otherwise.
pub fn footer_contrast(config: &SignConfig) -> Contrast {
    let background = config
        .colors
        .footer()
        .unwrap_or_else(|| config.colors.resolve(ColorRole::Background));
    Contrast::for_background(background)
}

/// Discrete title font sizes, largest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TitleSize {
    Huge,
    Large,
    Medium,
    Small,
    Tiny,
}

impl TitleSize {
    /// Bucket for a title, measured in characters after trimming.
    pub fn for_title(title: &str) -> Self {
        match title.trim().chars().count() {
            0..=10 => Self::Huge,
            11..=20 => Self::Large,
            21..=35 => Self::Medium,
            36..=50 => Self::Small,
            _ => Self::Tiny,
        }
    }

    pub fn css(self) -> &'static str {
        match self {
            Self::Huge => "4.5rem",
            Self::Large => "3.75rem",
            Self::Medium => "3rem",
            Self::Small => "2.5rem",
            Self::Tiny => "2rem",
        }
    }
}
