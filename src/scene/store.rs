use crate::{
    foundation::core::SceneId,
    foundation::error::{ReelError, ReelResult},
    scene::model::{Scene, SceneUpdate, WordOverride, total_duration_s},
};

const STARTER_BACKGROUND: &str =
    "https://images.unsplash.com/photo-1579621970563-ebec7560ff3e?auto=format&fit=crop&q=80&w=800";

/// Direction for [`SceneStore::reorder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards index 0.
    Up,
    /// Towards the end of the list.
    Down,
}

/// Owned, versioned scene list.
///
/// Invariant: never empty. Every successful mutation replaces whole scene records and bumps
/// [`SceneStore::version`]; a rejected mutation leaves both the scenes and the version untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneStore {
    scenes: Vec<Scene>,
    version: u64,
}

impl SceneStore {
    /// Build a store from an initial list, validating each scene and id uniqueness.
    pub fn new(scenes: Vec<Scene>) -> ReelResult<Self> {
        if scenes.is_empty() {
            return Err(ReelError::validation("scene list must contain at least one scene"));
        }
        let mut seen = std::collections::BTreeSet::new();
        for scene in &scenes {
            scene.validate()?;
            if !seen.insert(scene.id) {
                return Err(ReelError::validation(format!(
                    "duplicate scene id {}",
                    scene.id.0
                )));
            }
        }
        Ok(Self { scenes, version: 0 })
    }

    /// Five-scene starter storyboard.
    pub fn starter() -> Self {
        let rows: [(&str, f64, Option<&str>); 5] = [
            ("Wait...", 1.5, None),
            ("When do you build your empire?", 3.0, None),
            ("You don't need money to start", 3.5, Some(STARTER_BACKGROUND)),
            ("You need an idea and a product.", 2.5, None),
            ("Start now!", 3.0, None),
        ];
        let scenes = rows
            .iter()
            .zip(1u64..)
            .map(|(&(text, duration, image), id)| Scene {
                text: text.to_owned(),
                duration,
                background_image: image.map(str::to_owned),
                ..Scene::blank(SceneId(id))
            })
            .collect();
        Self { scenes, version: 0 }
    }

    /// Current scenes in timeline order.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Monotonic mutation counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of scenes (always >= 1).
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the store holds no scenes. Construction rejects that, so this reads false.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Look up a scene by id.
    pub fn get(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    /// Timeline index of a scene.
    pub fn index_of(&self, id: SceneId) -> Option<usize> {
        self.scenes.iter().position(|s| s.id == id)
    }

    /// Derived total duration in seconds.
    pub fn total_duration_s(&self) -> f64 {
        total_duration_s(&self.scenes)
    }

    fn require_index(&self, id: SceneId) -> ReelResult<usize> {
        self.index_of(id)
            .ok_or_else(|| ReelError::scene_op(format!("unknown scene id {}", id.0)))
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Id for the next added scene: `max(id) + 1`, or the lowest free id once `u64::MAX` is taken.
    fn next_id(&self) -> SceneId {
        let max = self.scenes.iter().map(|s| s.id.0).max().unwrap_or(0);
        if let Some(next) = max.checked_add(1) {
            return SceneId(next);
        }
        let taken: std::collections::BTreeSet<u64> = self.scenes.iter().map(|s| s.id.0).collect();
        SceneId((1..).find(|id| !taken.contains(id)).unwrap_or(0))
    }

    /// Append a blank scene and return its id.
    #[tracing::instrument(skip(self))]
    pub fn add(&mut self) -> SceneId {
        let id = self.next_id();
        self.scenes.push(Scene::blank(id));
        self.bump();
        id
    }

    /// Replace one field of a scene.
    #[tracing::instrument(skip(self, update), fields(field = update.field_name()))]
    pub fn update(&mut self, id: SceneId, update: SceneUpdate) -> ReelResult<()> {
        let idx = self.require_index(id)?;
        let next = update.apply_to(&self.scenes[idx])?;
        self.replace_at(idx, next);
        Ok(())
    }

    /// Replace a whole scene record, matched by its id.
    pub fn replace(&mut self, scene: Scene) -> ReelResult<()> {
        let idx = self.require_index(scene.id)?;
        scene.validate()?;
        self.replace_at(idx, scene);
        Ok(())
    }

    fn replace_at(&mut self, idx: usize, scene: Scene) {
        if self.scenes[idx] != scene {
            self.scenes[idx] = scene;
            self.bump();
        }
    }

    /// Remove a scene. Rejected when it is the only one.
    #[tracing::instrument(skip(self))]
    pub fn remove(&mut self, id: SceneId) -> ReelResult<Scene> {
        let idx = self.require_index(id)?;
        if self.scenes.len() <= 1 {
            return Err(ReelError::scene_op("cannot remove the last remaining scene"));
        }
        let removed = self.scenes.remove(idx);
        self.bump();
        Ok(removed)
    }

    /// Swap the scene at `index` with its neighbour in `direction`.
    #[tracing::instrument(skip(self))]
    pub fn reorder(&mut self, index: usize, direction: Direction) -> ReelResult<()> {
        if index >= self.scenes.len() {
            return Err(ReelError::scene_op(format!(
                "scene index {index} is out of bounds"
            )));
        }
        let other = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|&i| i < self.scenes.len()),
        }
        .ok_or_else(|| ReelError::scene_op("scene is already at the edge of the timeline"))?;
        self.scenes.swap(index, other);
        self.bump();
        Ok(())
    }

    /// Store or replace the override for one word.
    pub fn set_word_override(
        &mut self,
        id: SceneId,
        word_index: usize,
        word: WordOverride,
    ) -> ReelResult<()> {
        let idx = self.require_index(id)?;
        let mut words = self.scenes[idx].word_layouts.clone();
        words.insert(word_index, word);
        self.update(id, SceneUpdate::WordLayouts(words))
    }

    /// Drop the override of one word so it inherits again.
    pub fn reset_word_override(&mut self, id: SceneId, word_index: usize) -> ReelResult<()> {
        let idx = self.require_index(id)?;
        let mut words = self.scenes[idx].word_layouts.clone();
        if words.remove(&word_index).is_none() {
            return Ok(());
        }
        self.update(id, SceneUpdate::WordLayouts(words))
    }

    /// Drop every word override of a scene.
    pub fn reset_all_word_overrides(&mut self, id: SceneId) -> ReelResult<()> {
        self.update(id, SceneUpdate::WordLayouts(Default::default()))
    }

    /// Drop overrides whose index is beyond the current word count. Returns how many were removed.
    ///
    /// Never called implicitly: text edits keep orphaned overrides so they reappear if the words
    /// come back.
    pub fn prune_orphaned_overrides(&mut self, id: SceneId) -> ReelResult<usize> {
        let idx = self.require_index(id)?;
        let scene = &self.scenes[idx];
        let orphans = scene.orphaned_word_indices();
        if orphans.is_empty() {
            return Ok(0);
        }
        let mut words = scene.word_layouts.clone();
        for i in &orphans {
            words.remove(i);
        }
        self.update(id, SceneUpdate::WordLayouts(words))?;
        Ok(orphans.len())
    }

    /// Replace the whole list with the starter storyboard.
    pub fn reset_to_starter(&mut self) {
        self.scenes = Self::starter().scenes;
        self.bump();
    }
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::starter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/store.rs"]
mod tests;
