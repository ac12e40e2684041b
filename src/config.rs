//! Tunables for playback and gesture handling.
//!
//! Every struct deserializes with `#[serde(default)]`, so a storyboard file only needs to name the
//! values it changes.

use crate::foundation::error::{ReelError, ReelResult};

/// Extra time the last scene stays active after the timeline ends.
pub const DEFAULT_END_BUFFER_MS: f64 = 800.0;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Playback scheduler settings.
pub struct PlaybackConfig {
    /// Hold time after the final scene ends, so its entrance animation is not cut short.
    pub end_buffer_ms: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            end_buffer_ms: DEFAULT_END_BUFFER_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Gesture interpretation settings.
pub struct TransformConfig {
    /// Maximum absolute group offset per axis, in pixels.
    pub move_limit_px: f64,
    /// Scale change per pixel of vertical drag.
    pub scale_per_px: f64,
    /// Lower scale bound.
    pub min_scale: f64,
    /// Upper scale bound.
    pub max_scale: f64,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            move_limit_px: 1000.0,
            scale_per_px: 0.01,
            min_scale: 0.2,
            max_scale: 5.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Engine-wide configuration.
pub struct EngineConfig {
    /// Scheduler settings.
    pub playback: PlaybackConfig,
    /// Gesture settings.
    pub transform: TransformConfig,
}

impl EngineConfig {
    /// Reject non-finite or inverted values.
    pub fn validate(&self) -> ReelResult<()> {
        let p = &self.playback;
        if !p.end_buffer_ms.is_finite() || p.end_buffer_ms < 0.0 {
            return Err(ReelError::validation("end_buffer_ms must be finite and >= 0"));
        }

        let t = &self.transform;
        if !t.move_limit_px.is_finite() || t.move_limit_px <= 0.0 {
            return Err(ReelError::validation("move_limit_px must be finite and > 0"));
        }
        if !t.scale_per_px.is_finite() {
            return Err(ReelError::validation("scale_per_px must be finite"));
        }
        if !(t.min_scale.is_finite() && t.max_scale.is_finite()) || t.min_scale <= 0.0 {
            return Err(ReelError::validation(
                "scale bounds must be finite and min_scale > 0",
            ));
        }
        if t.min_scale > t.max_scale {
            return Err(ReelError::validation("min_scale must be <= max_scale"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
