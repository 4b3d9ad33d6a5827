//! Fixed palettes: note colors and reaction emoji.
//!
//! DESIGN
//! ======
//! Colors are palette tokens, not style strings. The token name is what the
//! store and the wire carry; `hex()` is the display value the client paints.
//! Parsing also accepts the display hex so older records written with raw
//! color strings keep loading.

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    #[error("unknown note color: {0}")]
    UnknownColor(String),
    #[error("unknown reaction emoji: {0}")]
    UnknownEmoji(String),
}

impl crate::frame::ErrorCode for PaletteError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownColor(_) => "E_UNKNOWN_COLOR",
            Self::UnknownEmoji(_) => "E_UNKNOWN_EMOJI",
        }
    }
}

// =============================================================================
// NOTE COLOR
// =============================================================================

/// One of the six sticky-note colors offered by the composer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NoteColor {
    #[default]
    Blush,
    Sky,
    Lavender,
    Mint,
    Peach,
    Lime,
}

impl NoteColor {
    /// Composer order.
    pub const ALL: [NoteColor; 6] = [Self::Blush, Self::Sky, Self::Lavender, Self::Mint, Self::Peach, Self::Lime];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Blush => "blush",
            Self::Sky => "sky",
            Self::Lavender => "lavender",
            Self::Mint => "mint",
            Self::Peach => "peach",
            Self::Lime => "lime",
        }
    }

    /// Display value as uppercase `#RRGGBB`.
    #[must_use]
    pub fn hex(self) -> &'static str {
        match self {
            Self::Blush => "#FFE4E1",
            Self::Sky => "#E1F5FE",
            Self::Lavender => "#F3E5F5",
            Self::Mint => "#E8F5E8",
            Self::Peach => "#FFF3E0",
            Self::Lime => "#F1F8E9",
        }
    }

    /// Human label for swatch tooltips.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Blush => "Light pink",
            Self::Sky => "Light blue",
            Self::Lavender => "Light purple",
            Self::Mint => "Light green",
            Self::Peach => "Light orange",
            Self::Lime => "Light lime",
        }
    }
}

impl FromStr for NoteColor {
    type Err = PaletteError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(trimmed) || c.hex().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| PaletteError::UnknownColor(raw.to_owned()))
    }
}

impl TryFrom<String> for NoteColor {
    type Error = PaletteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NoteColor> for String {
    fn from(color: NoteColor) -> Self {
        color.name().to_owned()
    }
}

impl fmt::Display for NoteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// REACTION EMOJI
// =============================================================================

/// One of the eight emoji offered by the reaction picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReactionEmoji {
    Heart,
    HeartEyes,
    SmilingHearts,
    Kiss,
    TwoHearts,
    Sparkles,
    GlowingStar,
    SparklingHeart,
}

impl ReactionEmoji {
    /// Picker order.
    pub const ALL: [ReactionEmoji; 8] = [
        Self::Heart,
        Self::HeartEyes,
        Self::SmilingHearts,
        Self::Kiss,
        Self::TwoHearts,
        Self::Sparkles,
        Self::GlowingStar,
        Self::SparklingHeart,
    ];

    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Heart => "\u{2764}\u{FE0F}",
            Self::HeartEyes => "\u{1F60D}",
            Self::SmilingHearts => "\u{1F970}",
            Self::Kiss => "\u{1F618}",
            Self::TwoHearts => "\u{1F495}",
            Self::Sparkles => "\u{2728}",
            Self::GlowingStar => "\u{1F31F}",
            Self::SparklingHeart => "\u{1F496}",
        }
    }
}

impl FromStr for ReactionEmoji {
    type Err = PaletteError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        // Some keyboards drop the variation selector on the red heart.
        let trimmed = raw.trim().trim_end_matches('\u{FE0F}');
        Self::ALL
            .into_iter()
            .find(|e| e.glyph().trim_end_matches('\u{FE0F}') == trimmed)
            .ok_or_else(|| PaletteError::UnknownEmoji(raw.to_owned()))
    }
}

impl TryFrom<String> for ReactionEmoji {
    type Error = PaletteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReactionEmoji> for String {
    fn from(emoji: ReactionEmoji) -> Self {
        emoji.glyph().to_owned()
    }
}

impl fmt::Display for ReactionEmoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}
