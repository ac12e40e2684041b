use crate::{animation::ease::Ease, scene::model::AnimationId};

/// Delay between the entrances of consecutive words, in milliseconds.
pub const WORD_STAGGER_MS: f64 = 250.0;

/// Interpolation contract for animated values.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` (may overshoot `[0, 1]`).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// Visual state of one word at one instant of its entrance.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct EntranceSample {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Scale multiplier on top of the resolved word scale.
    pub scale: f64,
    /// Vertical translation in pixels.
    pub translate_y: f64,
    /// Extra rotation in degrees.
    pub rotation_deg: f64,
    /// Gaussian blur radius in pixels.
    pub blur_px: f64,
}

impl EntranceSample {
    /// Fully visible, untransformed.
    pub const REST: Self = Self {
        opacity: 1.0,
        scale: 1.0,
        translate_y: 0.0,
        rotation_deg: 0.0,
        blur_px: 0.0,
    };

    /// Whether the word is drawn at all.
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

impl Lerp for EntranceSample {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            opacity: f64::lerp(&a.opacity, &b.opacity, t).clamp(0.0, 1.0),
            scale: f64::lerp(&a.scale, &b.scale, t),
            translate_y: f64::lerp(&a.translate_y, &b.translate_y, t),
            rotation_deg: f64::lerp(&a.rotation_deg, &b.rotation_deg, t),
            blur_px: f64::lerp(&a.blur_px, &b.blur_px, t).max(0.0),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Key {
    /// Normalized offset within the animation.
    at: f64,
    value: EntranceSample,
}

const fn key(at: f64, value: EntranceSample) -> Key {
    Key { at, value }
}

const fn pose(
    opacity: f64,
    scale: f64,
    translate_y: f64,
    rotation_deg: f64,
    blur_px: f64,
) -> EntranceSample {
    EntranceSample {
        opacity,
        scale,
        translate_y,
        rotation_deg,
        blur_px,
    }
}

/// A fixed entrance curve: sorted keys, eased per segment.
#[derive(Clone, Copy, Debug)]
pub struct Entrance {
    duration_ms: f64,
    ease: Ease,
    keys: &'static [Key],
}

const STOMP_KEYS: &[Key] = &[
    key(0.0, pose(0.0, 3.0, 0.0, 0.0, 0.0)),
    key(0.4, EntranceSample::REST),
    key(1.0, EntranceSample::REST),
];
const SLIDE_UP_KEYS: &[Key] = &[
    key(0.0, pose(0.0, 1.0, 50.0, 0.0, 0.0)),
    key(1.0, EntranceSample::REST),
];
const POP_IN_KEYS: &[Key] = &[
    key(0.0, pose(0.0, 0.0, 0.0, 0.0, 0.0)),
    key(0.8, pose(1.0, 1.2, 0.0, 0.0, 0.0)),
    key(1.0, EntranceSample::REST),
];
const ROTATE_IN_KEYS: &[Key] = &[
    key(0.0, pose(0.0, 0.5, 0.0, -90.0, 0.0)),
    key(1.0, EntranceSample::REST),
];
const BLUR_IN_KEYS: &[Key] = &[
    key(0.0, pose(0.0, 1.5, 0.0, 0.0, 20.0)),
    key(1.0, EntranceSample::REST),
];

impl Entrance {
    /// Curve for an animation id.
    pub fn of(id: AnimationId) -> Self {
        match id {
            AnimationId::Stomp => Self {
                duration_ms: 400.0,
                ease: Ease::CubicBezier {
                    x1: 0.1,
                    y1: 0.9,
                    x2: 0.2,
                    y2: 1.0,
                },
                keys: STOMP_KEYS,
            },
            AnimationId::SlideUp => Self {
                duration_ms: 400.0,
                ease: Ease::EASE_OUT,
                keys: SLIDE_UP_KEYS,
            },
            AnimationId::PopIn => Self {
                duration_ms: 400.0,
                ease: Ease::CubicBezier {
                    x1: 0.17,
                    y1: 0.67,
                    x2: 0.83,
                    y2: 0.67,
                },
                keys: POP_IN_KEYS,
            },
            AnimationId::RotateIn => Self {
                duration_ms: 500.0,
                ease: Ease::EASE_OUT,
                keys: ROTATE_IN_KEYS,
            },
            AnimationId::BlurIn => Self {
                duration_ms: 500.0,
                ease: Ease::EASE_OUT,
                keys: BLUR_IN_KEYS,
            },
        }
    }

    /// Length of one word's entrance.
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Timing curve applied within each key segment.
    pub fn ease(&self) -> Ease {
        self.ease
    }

    /// Value at normalized progress `t`; holds the last key after the end.
    fn at(&self, t: f64) -> EntranceSample {
        let idx = self.keys.partition_point(|k| k.at <= t);
        if idx == 0 {
            return self.keys[0].value;
        }
        if idx >= self.keys.len() {
            return self.keys[self.keys.len() - 1].value;
        }
        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let span = b.at - a.at;
        if span <= 0.0 {
            return a.value;
        }
        let te = self.ease.apply((t - a.at) / span);
        EntranceSample::lerp(&a.value, &b.value, te)
    }

    /// Sample the entrance of the word at `word_index`, `local_ms` after the scene became active.
    ///
    /// Before the word's stagger delay it is hidden; after its entrance it rests.
    pub fn sample(&self, word_index: usize, local_ms: f64) -> EntranceSample {
        let since = local_ms - word_delay_ms(word_index);
        if since < 0.0 || since.is_nan() {
            return EntranceSample {
                opacity: 0.0,
                ..self.keys[0].value
            };
        }
        self.at(since / self.duration_ms)
    }

    /// Time at which the word at `word_index` reaches rest.
    pub fn settled_at_ms(&self, word_index: usize) -> f64 {
        word_delay_ms(word_index) + self.duration_ms
    }
}

/// Entrance delay of the word at `index`.
pub fn word_delay_ms(index: usize) -> f64 {
    index as f64 * WORD_STAGGER_MS
}

/// Sample `animation` for one word.
pub fn sample(animation: AnimationId, word_index: usize, local_ms: f64) -> EntranceSample {
    Entrance::of(animation).sample(word_index, local_ms)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/entrance.rs"]
mod tests;
