//! Pure rendering of a sign into named output slots.
//!
//! [`render`] turns configuration, room name, and time into a [`RenderPlan`]
//! without touching any output surface. [`RenderPlan::apply`] is the only step
//! that writes, and it writes through the [`RenderTarget`] capability set.

use chrono::NaiveTime;

use crate::clock::format_time;
use crate::content::{footer_contrast, TitleSize};
use crate::sign::{BartenderPolicy, SignConfig};
use crate::source::RoomName;
use crate::style::synthesize;

/// Text that replaces the whole page when the configuration cannot load.
pub const CONFIG_ERROR_NOTICE: &str = "Error loading configuration. Please try again later.";

/// A named element the host page provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    StyleBlock,
    PaintingTitle,
    ArtistName,
    BartenderName,
    PaintingImage,
    BartenderContainer,
    RoomName,
    CurrentTime,
    FooterBar,
}

impl Slot {
    pub const ALL: [Slot; 9] = [
        Slot::StyleBlock,
        Slot::PaintingTitle,
        Slot::ArtistName,
        Slot::BartenderName,
        Slot::PaintingImage,
        Slot::BartenderContainer,
        Slot::RoomName,
        Slot::CurrentTime,
        Slot::FooterBar,
    ];

    /// CSS selector locating this slot in the host page.
    pub fn selector(self) -> &'static str {
        match self {
            Self::StyleBlock => "#dynamic-styles",
            Self::PaintingTitle => "#painting-title",
            Self::ArtistName => "#artist-name",
            Self::BartenderName => "#bartender-name",
            Self::PaintingImage => ".painting-image",
            Self::BartenderContainer => "#bartender-container",
            Self::RoomName => "#room-name",
            Self::CurrentTime => "#current-time",
            Self::FooterBar => "#footer-bar",
        }
    }
}

/// Output capabilities the renderer needs from a page.
pub trait RenderTarget {
    fn has_slot(&self, slot: Slot) -> bool;
    /// Replace the slot's content with plain text.
    fn set_text(&mut self, slot: Slot, text: &str);
    fn set_attribute(&mut self, slot: Slot, name: &str, value: &str);
    /// Set one inline style property; an empty value clears it.
    fn set_style(&mut self, slot: Slot, property: &str, value: &str);
    /// Discard the page content and show only `text`.
    fn replace_body(&mut self, text: &str);
}

/// One write against a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOp {
    Text {
        slot: Slot,
        text: String,
    },
    Attribute {
        slot: Slot,
        name: &'static str,
        value: String,
    },
    Style {
        slot: Slot,
        property: &'static str,
        value: String,
    },
}

impl RenderOp {
    pub fn slot(&self) -> Slot {
        match self {
            Self::Text { slot, .. } | Self::Attribute { slot, .. } | Self::Style { slot, .. } => {
                *slot
            }
        }
    }
}

/// Ordered writes for one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderPlan {
    pub ops: Vec<RenderOp>,
}

impl RenderPlan {
    fn text(&mut self, slot: Slot, text: impl Into<String>) {
        self.ops.push(RenderOp::Text {
            slot,
            text: text.into(),
        });
    }

    fn attribute(&mut self, slot: Slot, name: &'static str, value: impl Into<String>) {
        self.ops.push(RenderOp::Attribute {
            slot,
            name,
            value: value.into(),
        });
    }

    fn style(&mut self, slot: Slot, property: &'static str, value: impl Into<String>) {
        self.ops.push(RenderOp::Style {
            slot,
            property,
            value: value.into(),
        });
    }

    /// First text written to `slot`, if any.
    pub fn text_for(&self, slot: Slot) -> Option<&str> {
        self.ops.iter().find_map(|op| match op {
            RenderOp::Text { slot: s, text } if *s == slot => Some(text.as_str()),
            _ => None,
        })
    }

    /// Style value written to `slot` for `property`, if any.
    pub fn style_for(&self, slot: Slot, property: &str) -> Option<&str> {
        self.ops.iter().find_map(|op| match op {
            RenderOp::Style {
                slot: s,
                property: p,
                value,
            } if *s == slot && *p == property => Some(value.as_str()),
            _ => None,
        })
    }

    /// Write the plan into a target. Ops for slots the page lacks are skipped.
    pub fn apply<T: RenderTarget + ?Sized>(&self, target: &mut T) {
        for op in &self.ops {
            let slot = op.slot();
            if !target.has_slot(slot) {
                tracing::debug!(?slot, "page has no element for slot, skipping");
                continue;
            }
            match op {
                RenderOp::Text { text, .. } => target.set_text(slot, text),
                RenderOp::Attribute { name, value, .. } => target.set_attribute(slot, name, value),
                RenderOp::Style {
                    property, value, ..
                } => target.set_style(slot, property, value),
            }
        }
    }
}

/// Runtime choices that are not part of the config document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub bartender: BartenderPolicy,
}

/// Compute every slot write for one load of the sign.
pub fn render(
    config: &SignConfig,
    room: &RoomName,
    now: NaiveTime,
    options: &RenderOptions,
) -> RenderPlan {
    let mut plan = RenderPlan::default();

    plan.text(Slot::StyleBlock, synthesize(config).as_str());

    plan.text(Slot::PaintingTitle, config.painting_name.as_str());
    plan.text(Slot::ArtistName, config.artist_name.as_str());
    plan.text(Slot::BartenderName, config.bartender_name.as_str());

    if let Some(source) = config.painting_source.as_deref().filter(|s| !s.is_empty()) {
        plan.attribute(Slot::PaintingImage, "src", source);
    }

    let visible = options.bartender.is_visible(config.bartender_enabled);
    plan.style(
        Slot::BartenderContainer,
        "display",
        if visible { "" } else { "none" },
    );

    let contrast = footer_contrast(config);
    plan.style(Slot::RoomName, "color", contrast.foreground());
    plan.style(Slot::CurrentTime, "color", contrast.foreground());
    plan.style(Slot::FooterBar, "border-top", contrast.border());

    plan.style(
        Slot::PaintingTitle,
        "font-size",
        TitleSize::for_title(&config.painting_name).css(),
    );

    plan.text(Slot::RoomName, room.display_text());
    plan.text(Slot::CurrentTime, format_time(now));

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Contrast;
    use crate::testsupport::{sign_config_fixture, RecordingTarget};

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 30, 0).unwrap()
    }

    #[test]
    fn render_fills_text_slots() {
        let room = RoomName::Loaded("Gallery 4".into());
        let plan = render(&sign_config_fixture(), &room, noon(), &RenderOptions::default());
        assert_eq!(plan.text_for(Slot::PaintingTitle), Some("Starry Night"));
        assert_eq!(plan.text_for(Slot::ArtistName), Some("Vincent van Gogh"));
        assert_eq!(plan.text_for(Slot::BartenderName), Some("Sam"));
        assert_eq!(plan.text_for(Slot::RoomName), Some("Gallery 4"));
        assert_eq!(plan.text_for(Slot::CurrentTime), Some("12:30 PM"));
        assert!(plan
            .text_for(Slot::StyleBlock)
            .is_some_and(|css| css.contains(".left-panel")));
    }

    #[test]
    fn render_sizes_title_and_contrasts_footer() {
        let plan = render(
            &sign_config_fixture(),
            &RoomName::Missing,
            noon(),
            &RenderOptions::default(),
        );
        assert_eq!(plan.style_for(Slot::PaintingTitle, "font-size"), Some("3.75rem"));
        // Fixture footer is #eeeeee, a bright background.
        assert_eq!(
            plan.style_for(Slot::RoomName, "color"),
            Some(Contrast::Dark.foreground())
        );
        assert_eq!(
            plan.style_for(Slot::FooterBar, "border-top"),
            Some(Contrast::Dark.border())
        );
    }

    #[test]
    fn image_source_only_when_configured() {
        let mut config = sign_config_fixture();
        let plan = render(&config, &RoomName::Missing, noon(), &RenderOptions::default());
        assert!(plan.ops.contains(&RenderOp::Attribute {
            slot: Slot::PaintingImage,
            name: "src",
            value: "images/starry-night.jpg".into(),
        }));

        config.painting_source = None;
        let plan = render(&config, &RoomName::Missing, noon(), &RenderOptions::default());
        assert!(!plan.ops.iter().any(|op| op.slot() == Slot::PaintingImage));
    }

    #[test]
    fn bartender_visibility_follows_policy() {
        let mut config = sign_config_fixture();
        config.bartender_enabled = None;

        let shown = RenderOptions {
            bartender: BartenderPolicy::ShownUnlessDisabled,
        };
        let plan = render(&config, &RoomName::Missing, noon(), &shown);
        assert_eq!(plan.style_for(Slot::BartenderContainer, "display"), Some(""));

        let hidden = RenderOptions {
            bartender: BartenderPolicy::HiddenUnlessEnabled,
        };
        let plan = render(&config, &RoomName::Missing, noon(), &hidden);
        assert_eq!(
            plan.style_for(Slot::BartenderContainer, "display"),
            Some("none")
        );
    }

    #[test]
    fn apply_skips_slots_the_page_lacks() {
        let plan = render(
            &sign_config_fixture(),
            &RoomName::Missing,
            noon(),
            &RenderOptions::default(),
        );
        let mut target = RecordingTarget::without(&[Slot::PaintingImage, Slot::FooterBar]);
        plan.apply(&mut target);
        assert!(target.writes_to(Slot::PaintingTitle) > 0);
        assert_eq!(target.writes_to(Slot::PaintingImage), 0);
        assert_eq!(target.writes_to(Slot::FooterBar), 0);
        assert!(!target.body_replaced());
    }

    #[test]
    fn every_slot_has_a_selector() {
        for slot in Slot::ALL {
            let selector = slot.selector();
            assert!(selector.starts_with('#') || selector.starts_with('.'));
        }
    }
}
