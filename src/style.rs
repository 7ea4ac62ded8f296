//! Stylesheet synthesis from sign colors and fonts.

use std::fmt::Write as _;

use crate::sign::{resolve_font, ColorRole, SignConfig};

/// Generated style text for the sign's style slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet(String);

impl Stylesheet {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Build the full stylesheet for one config.
///
/// Each run produces the complete text; callers replace whatever was in
/// the style slot before.
pub fn synthesize(config: &SignConfig) -> Stylesheet {
    let colors = &config.colors;
    let fonts = &config.fonts;

    let mut css = String::new();
    rule(
        &mut css,
        "body",
        &[("background-color", colors.resolve(ColorRole::Background).to_string())],
    );
    rule(
        &mut css,
        ".painting-title",
        &[
            ("color", colors.resolve(ColorRole::Title).to_string()),
            ("font-family", resolve_font(fonts.painting_font.as_deref()).to_string()),
        ],
    );
    rule(
        &mut css,
        ".artist",
        &[
            ("color", colors.resolve(ColorRole::Artist).to_string()),
            ("font-family", resolve_font(fonts.artist_font.as_deref()).to_string()),
        ],
    );
    rule(
        &mut css,
        ".bartender",
        &[
            ("color", colors.resolve(ColorRole::Bartender).to_string()),
            ("font-family", resolve_font(fonts.bartender_font.as_deref()).to_string()),
        ],
    );
    rule(
        &mut css,
        ".label",
        &[("color", colors.resolve(ColorRole::Label).to_string())],
    );
    rule(
        &mut css,
        ".left-panel",
        &[(
            "background-color",
            colors.resolve(ColorRole::PanelBackground).to_string(),
        )],
    );
    if let Some(footer) = colors.footer() {
        rule(&mut css, ".footer-bar", &[("background-color", footer.to_string())]);
    }
    Stylesheet(css)
}

fn rule(css: &mut String, selector: &str, declarations: &[(&str, String)]) {
    // Writing into a String cannot fail.
    let _ = writeln!(css, "{selector} {{");
    for (property, value) in declarations {
        let _ = writeln!(css, "  {property}: {value};");
    }
    let _ = writeln!(css, "}}");
}
