use smallvec::SmallVec;

use crate::{
    foundation::core::Vec2,
    scene::color::ColorDef,
    scene::model::{Scene, Shadow, Theme},
    text::curve::{CharOffset, curve},
};

/// Palette slot a word is painted with when it has no explicit colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRole {
    /// The theme's body text colour.
    Text,
    /// The theme's accent colour.
    Accent,
}

impl ColorRole {
    /// Default role of the word at `index`: odd words are accented.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 1 {
            Self::Accent
        } else {
            Self::Text
        }
    }
}

/// Colour a word is painted with.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WordColor {
    /// Resolved by the renderer from the scene theme.
    Theme {
        /// Scene theme.
        theme: Theme,
        /// Palette slot within the theme.
        role: ColorRole,
    },
    /// Explicit per-word colour.
    Explicit(ColorDef),
}

/// A caption word with every override layered over the group and theme defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedWord {
    /// Position in the caption.
    pub index: usize,
    /// Word text.
    pub text: String,
    /// Offset in the group's local frame.
    pub offset: Vec2,
    /// Scale relative to the group.
    pub scale: f64,
    /// Rotation in degrees relative to the group.
    pub rotation: f64,
    /// Paint colour.
    pub color: WordColor,
    /// Font family, when overridden.
    pub font: Option<String>,
    /// Shadow: the word's own, else the group's.
    pub shadow: Option<Shadow>,
    /// Curve amount (0 when flat).
    pub curve: f64,
    /// Per-character curve offsets.
    pub chars: SmallVec<[CharOffset; 16]>,
}

/// Resolve every word of a scene's caption.
///
/// Overrides whose index is beyond the word count are ignored here; they stay in the scene.
pub fn resolve_words(scene: &Scene) -> Vec<ResolvedWord> {
    scene
        .words()
        .enumerate()
        .map(|(index, text)| {
            let ov = scene.word_layouts.get(&index);
            let amount = ov.and_then(|o| o.curve).unwrap_or(0.0);
            let color = match ov.and_then(|o| o.color) {
                Some(c) => WordColor::Explicit(c),
                None => WordColor::Theme {
                    theme: scene.theme,
                    role: ColorRole::for_index(index),
                },
            };
            ResolvedWord {
                index,
                text: text.to_owned(),
                offset: ov.map(|o| o.offset()).unwrap_or(Vec2::ZERO),
                scale: ov.and_then(|o| o.scale).unwrap_or(1.0),
                rotation: ov.and_then(|o| o.rotation).unwrap_or(0.0),
                color,
                font: ov.and_then(|o| o.font.clone()),
                shadow: ov
                    .and_then(|o| o.shadow.clone())
                    .or_else(|| scene.group_layout.shadow.clone()),
                curve: amount,
                chars: curve(text, amount),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/text/words.rs"]
mod tests;
