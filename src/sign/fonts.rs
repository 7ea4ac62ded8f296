//! Font allow-list.
//!
//! Configured font names are never interpolated into style text directly;
//! they select one of these pre-approved stacks.

/// Stack used for any name not on the allow-list.
pub const FALLBACK_FONT_STACK: &str = "'Arial', sans-serif";

/// Allowed font names and their full family stacks.
pub const ALLOWED_FONTS: &[(&str, &str)] = &[
    ("Roboto", "'Roboto', sans-serif"),
    ("Slabo 27px", "'Slabo 27px', serif"),
    ("Delius", "'Delius', cursive"),
    ("Borel", "'Borel', cursive"),
    ("Chewy", "'Chewy', system-ui"),
    ("Parisienne", "'Parisienne', cursive"),
    ("Barriecito", "'Barriecito', system-ui"),
    ("Bangers", "'Bangers', system-ui"),
    ("Caveat", "'Caveat', cursive"),
    ("DM Serif Text", "'DM Serif Text', serif"),
];

/// Resolve a configured font name to a font stack.
pub fn resolve_font(name: Option<&str>) -> &'static str {
    let Some(name) = name else {
        return FALLBACK_FONT_STACK;
    };
    ALLOWED_FONTS
        .iter()
        .find(|(allowed, _)| *allowed == name)
        .map(|(_, stack)| *stack)
        .unwrap_or_else(|| {
            tracing::warn!(font = name, "font not on allow-list, using fallback stack");
            FALLBACK_FONT_STACK
        })
}
