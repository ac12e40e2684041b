use crate::scene::model::Scene;

/// Cumulative scene start offsets for one scene list.
///
/// Scene `i` owns the half-open interval `[start_i, start_i + duration_i)`, so a boundary instant
/// belongs to the later scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    starts_ms: Vec<f64>,
    total_ms: f64,
}

impl Timeline {
    /// Build from live scene durations.
    pub fn new(scenes: &[Scene]) -> Self {
        Self::from_durations_ms(scenes.iter().map(Scene::duration_ms))
    }

    /// Build from raw durations in milliseconds.
    pub fn from_durations_ms(durations: impl IntoIterator<Item = f64>) -> Self {
        let mut starts_ms = Vec::new();
        let mut acc = 0.0f64;
        for d in durations {
            starts_ms.push(acc);
            acc += d.max(0.0);
        }
        Self {
            starts_ms,
            total_ms: acc,
        }
    }

    /// Sum of durations.
    pub fn total_ms(&self) -> f64 {
        self.total_ms
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.starts_ms.len()
    }

    /// True for an empty scene list.
    pub fn is_empty(&self) -> bool {
        self.starts_ms.is_empty()
    }

    /// Start offset of scene `index`.
    pub fn scene_start_ms(&self, index: usize) -> Option<f64> {
        self.starts_ms.get(index).copied()
    }

    /// Index of the scene active at `elapsed_ms`. Past the end, the last scene stays active.
    pub fn locate(&self, elapsed_ms: f64) -> Option<usize> {
        if self.starts_ms.is_empty() {
            return None;
        }
        let after = self.starts_ms.partition_point(|&s| s <= elapsed_ms);
        Some(after.saturating_sub(1))
    }

    /// `min(elapsed / total, 1)`, with negative time reading as zero.
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.total_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms / self.total_ms).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/timeline.rs"]
mod tests;
