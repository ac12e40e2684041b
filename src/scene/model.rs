use std::collections::BTreeMap;

use crate::{
    foundation::core::{Canvas, SceneId, Vec2, secs_to_ms},
    foundation::error::{ReelError, ReelResult},
    scene::color::ColorDef,
};

/// Shortest allowed scene duration in seconds.
pub const MIN_SCENE_DURATION_S: f64 = 0.5;
/// Longest allowed scene duration in seconds.
pub const MAX_SCENE_DURATION_S: f64 = 10.0;
/// Duration given to freshly added scenes.
pub const DEFAULT_SCENE_DURATION_S: f64 = 2.5;
/// Font size of a freshly added scene's text block.
pub const DEFAULT_FONT_SIZE: f64 = 48.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One timed storyboard unit: a caption plus its layout and style overrides.
pub struct Scene {
    /// Stable identifier, unique within a store.
    pub id: SceneId,
    /// Caption text. Words are whitespace-separated tokens.
    pub text: String,
    /// Duration in seconds, always within `[0.5, 10]`.
    pub duration: f64,
    /// Palette selector; the palette itself lives in the renderer.
    #[serde(default)]
    pub theme: Theme,
    /// Entrance animation applied to each word.
    #[serde(default)]
    pub animation: AnimationId,
    /// Horizontal text alignment within the block.
    #[serde(default)]
    pub align: Align,
    /// Whole-block transform.
    #[serde(default)]
    pub group_layout: GroupLayout,
    /// Sparse per-word overrides keyed by word index.
    ///
    /// Indices beyond the current word count are kept when text shrinks.
    #[serde(default)]
    pub word_layouts: BTreeMap<usize, WordOverride>,
    /// Decoration bound to this scene.
    #[serde(default)]
    pub decoration: SceneDecoration,
    /// Background image URL. The themed background shows when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
}

impl Scene {
    /// Blank scene with default styling, as created by "add scene".
    pub fn blank(id: SceneId) -> Self {
        Self {
            id,
            text: String::new(),
            duration: DEFAULT_SCENE_DURATION_S,
            theme: Theme::default(),
            animation: AnimationId::default(),
            align: Align::default(),
            group_layout: GroupLayout::default(),
            word_layouts: BTreeMap::new(),
            decoration: SceneDecoration::default(),
            background_image: None,
        }
    }

    /// Scene with the given caption and duration (clamped into the allowed range).
    pub fn new(id: SceneId, text: impl Into<String>, duration_s: f64) -> ReelResult<Self> {
        Ok(Self {
            text: text.into(),
            duration: clamp_duration(duration_s)?,
            ..Self::blank(id)
        })
    }

    /// Duration in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        secs_to_ms(self.duration)
    }

    /// Whitespace-separated words of the caption.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }

    /// Number of words in the caption.
    pub fn word_count(&self) -> usize {
        self.words().count()
    }

    /// Word override indices that no longer address a word of the current text.
    pub fn orphaned_word_indices(&self) -> Vec<usize> {
        let n = self.word_count();
        self.word_layouts.keys().copied().filter(|&i| i >= n).collect()
    }

    /// Check field invariants for scenes that did not come through the store (e.g. JSON input).
    pub fn validate(&self) -> ReelResult<()> {
        if !self.duration.is_finite()
            || !(MIN_SCENE_DURATION_S..=MAX_SCENE_DURATION_S).contains(&self.duration)
        {
            return Err(ReelError::validation(format!(
                "scene {} duration {} is outside [{MIN_SCENE_DURATION_S}, {MAX_SCENE_DURATION_S}]",
                self.id.0, self.duration
            )));
        }
        self.group_layout.validate()?;
        for (idx, word) in &self.word_layouts {
            word.validate().map_err(|e| {
                ReelError::validation(format!("scene {} word {idx}: {e}", self.id.0))
            })?;
        }
        Ok(())
    }
}

/// Clamp a requested duration into `[0.5, 10]` seconds. Non-finite input is rejected.
pub fn clamp_duration(secs: f64) -> ReelResult<f64> {
    if !secs.is_finite() {
        return Err(ReelError::validation("scene duration must be finite"));
    }
    Ok(secs.clamp(MIN_SCENE_DURATION_S, MAX_SCENE_DURATION_S))
}

/// Sum of scene durations in seconds.
pub fn total_duration_s(scenes: &[Scene]) -> f64 {
    scenes.iter().map(|s| s.duration).sum()
}

/// Sum of scene durations in milliseconds.
pub fn total_duration_ms(scenes: &[Scene]) -> f64 {
    scenes.iter().map(Scene::duration_ms).sum()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Named background/text palette.
pub enum Theme {
    /// Dark slate background, white text, yellow accent.
    #[default]
    Midnight,
    /// Yellow background, black text.
    Lemonade,
    /// Red background, white text.
    Crimson,
    /// Black background, green accent.
    Pitch,
    /// White background, red accent.
    Clean,
    /// Indigo background, pink accent.
    Royal,
    /// Cyan background, purple accent.
    Neon,
}

impl Theme {
    /// Every theme in display order.
    pub const ALL: [Theme; 7] = [
        Theme::Midnight,
        Theme::Lemonade,
        Theme::Crimson,
        Theme::Pitch,
        Theme::Clean,
        Theme::Royal,
        Theme::Neon,
    ];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Per-word entrance animation.
pub enum AnimationId {
    /// Drops in from 3x scale.
    #[default]
    Stomp,
    /// Rises 50px while fading in.
    SlideUp,
    /// Grows from nothing with a slight overshoot.
    PopIn,
    /// Unwinds from -90 degrees at half size.
    RotateIn,
    /// Sharpens from a 20px blur at 1.5x scale.
    BlurIn,
}

impl AnimationId {
    /// Every entrance animation.
    pub const ALL: [AnimationId; 5] = [
        AnimationId::Stomp,
        AnimationId::SlideUp,
        AnimationId::PopIn,
        AnimationId::RotateIn,
        AnimationId::BlurIn,
    ];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Horizontal text alignment.
pub enum Align {
    /// Flush left.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Flush right.
    Right,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Drop shadow parameters.
pub struct Shadow {
    /// Horizontal offset in pixels.
    pub offset_x: f64,
    /// Vertical offset in pixels.
    pub offset_y: f64,
    /// Blur radius in pixels (>= 0).
    pub blur: f64,
    /// Shadow colour.
    pub color: ColorDef,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 4.0,
            blur: 12.0,
            color: ColorDef::black(),
        }
    }
}

impl Shadow {
    fn validate(&self) -> ReelResult<()> {
        if !(self.offset_x.is_finite() && self.offset_y.is_finite()) {
            return Err(ReelError::validation("shadow offsets must be finite"));
        }
        if !self.blur.is_finite() || self.blur < 0.0 {
            return Err(ReelError::validation("shadow blur must be finite and >= 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Transform applied to a scene's whole text block.
pub struct GroupLayout {
    /// Horizontal offset from the canvas center, in screen pixels.
    pub x: f64,
    /// Vertical offset from the canvas center, in screen pixels.
    pub y: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Rotation in degrees, clockwise in screen space.
    pub rotation: f64,
    /// Base font size in pixels.
    pub font_size: f64,
    /// Optional block shadow, inherited by words without their own.
    pub shadow: Option<Shadow>,
}

impl Default for GroupLayout {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotation: 0.0,
            font_size: DEFAULT_FONT_SIZE,
            shadow: None,
        }
    }
}

impl GroupLayout {
    /// Block offset as a vector.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    fn validate(&self) -> ReelResult<()> {
        let finite = [self.x, self.y, self.scale, self.rotation, self.font_size]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(ReelError::validation("group layout values must be finite"));
        }
        if self.scale <= 0.0 {
            return Err(ReelError::validation("group scale must be > 0"));
        }
        if self.font_size <= 0.0 {
            return Err(ReelError::validation("group font_size must be > 0"));
        }
        if let Some(shadow) = &self.shadow {
            shadow.validate()?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Per-word exception layered on top of the group layout and theme.
///
/// `None` fields inherit. Offsets (`x`, `y`) are in the group's local (unrotated, unscaled) frame.
pub struct WordOverride {
    /// Local horizontal offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Local vertical offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Scale relative to the group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Rotation in degrees relative to the group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Explicit colour, replacing the theme's text/accent role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorDef>,
    /// Font family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    /// Curve amount; see [`crate::curve`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<f64>,
    /// Word shadow, replacing the group shadow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
}

impl WordOverride {
    /// True when every field inherits.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Local offset, treating absent components as zero.
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.x.unwrap_or(0.0), self.y.unwrap_or(0.0))
    }

    fn validate(&self) -> ReelResult<()> {
        let finite = [self.x, self.y, self.scale, self.rotation, self.curve]
            .iter()
            .flatten()
            .all(|v| v.is_finite());
        if !finite {
            return Err(ReelError::validation("word override values must be finite"));
        }
        if matches!(self.scale, Some(s) if s <= 0.0) {
            return Err(ReelError::validation("word scale must be > 0"));
        }
        if let Some(shadow) = &self.shadow {
            shadow.validate()?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Overlay animation bound to a single scene.
pub enum SceneDecoration {
    /// No overlay.
    #[default]
    None,
    /// Twinkling sparkles.
    Sparkle,
    /// Falling confetti.
    Confetti,
    /// Floating hearts.
    Hearts,
    /// A light sweep spanning exactly the scene.
    Spotlight,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Overlay animation spanning the whole video.
pub enum GlobalDecoration {
    /// No overlay.
    #[default]
    None,
    /// Drifting star field.
    Starfield,
    /// Film grain.
    Grain,
    /// Slow colour wash.
    Aurora,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Output aspect ratio preset.
pub enum AspectRatio {
    /// 9:16 reel / story.
    #[default]
    Portrait9x16,
    /// 16:9 landscape.
    Landscape16x9,
    /// 1:1 square post.
    Square1x1,
}

impl AspectRatio {
    /// Nominal output canvas for this preset.
    pub fn canvas(self) -> Canvas {
        let (width, height) = match self {
            Self::Portrait9x16 => (1080, 1920),
            Self::Landscape16x9 => (1920, 1080),
            Self::Square1x1 => (1080, 1080),
        };
        Canvas { width, height }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Video-wide settings. Total duration is derived from the scene list and not stored.
pub struct GlobalSettings {
    /// Video-scoped decoration.
    pub decoration: GlobalDecoration,
    /// Output aspect ratio.
    pub aspect_ratio: AspectRatio,
}

impl GlobalSettings {
    /// Derived total duration in seconds.
    pub fn total_duration(&self, scenes: &[Scene]) -> f64 {
        total_duration_s(scenes)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
/// A whole-field replacement for one scene.
pub enum SceneUpdate {
    /// Replace the caption.
    Text(String),
    /// Replace the duration (clamped).
    Duration(f64),
    /// Replace the theme.
    Theme(Theme),
    /// Replace the entrance animation.
    Animation(AnimationId),
    /// Replace the alignment.
    Align(Align),
    /// Replace the group layout.
    GroupLayout(GroupLayout),
    /// Replace the whole word override map.
    WordLayouts(BTreeMap<usize, WordOverride>),
    /// Replace the scene decoration.
    Decoration(SceneDecoration),
    /// Replace the background image. Blank URLs clear it.
    BackgroundImage(Option<String>),
}

impl SceneUpdate {
    /// Field name, for diagnostics.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Duration(_) => "duration",
            Self::Theme(_) => "theme",
            Self::Animation(_) => "animation",
            Self::Align(_) => "align",
            Self::GroupLayout(_) => "group_layout",
            Self::WordLayouts(_) => "word_layouts",
            Self::Decoration(_) => "decoration",
            Self::BackgroundImage(_) => "background_image",
        }
    }

    /// Produce the scene with this field replaced, leaving `scene` untouched.
    pub(crate) fn apply_to(self, scene: &Scene) -> ReelResult<Scene> {
        let mut next = scene.clone();
        match self {
            Self::Text(text) => next.text = text,
            Self::Duration(d) => next.duration = clamp_duration(d)?,
            Self::Theme(t) => next.theme = t,
            Self::Animation(a) => next.animation = a,
            Self::Align(a) => next.align = a,
            Self::GroupLayout(g) => {
                g.validate()?;
                next.group_layout = g;
            }
            Self::WordLayouts(w) => {
                for word in w.values() {
                    word.validate()?;
                }
                next.word_layouts = w;
            }
            Self::Decoration(d) => next.decoration = d,
            Self::BackgroundImage(url) => {
                next.background_image = url.filter(|u| !u.trim().is_empty());
            }
        }
        Ok(next)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
