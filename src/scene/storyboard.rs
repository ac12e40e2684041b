use std::path::Path;

use anyhow::Context as _;

use crate::{
    config::EngineConfig,
    foundation::error::{ReelError, ReelResult},
    scene::model::{GlobalSettings, Scene},
    scene::store::SceneStore,
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// On-disk storyboard: scenes, video-wide settings and optional engine tunables.
pub struct Storyboard {
    /// Video-wide settings.
    #[serde(default)]
    pub settings: GlobalSettings,
    /// Scenes in timeline order.
    pub scenes: Vec<Scene>,
    /// Engine configuration overrides.
    #[serde(default)]
    pub config: EngineConfig,
}

impl Storyboard {
    /// Parse a storyboard from JSON text.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        serde_json::from_str(s).map_err(|e| ReelError::serde(e.to_string()))
    }

    /// Read and parse a storyboard JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read storyboard '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Serialize as pretty JSON.
    pub fn to_json_pretty(&self) -> ReelResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ReelError::serde(e.to_string()))
    }

    /// Validate configuration and scenes.
    pub fn validate(&self) -> ReelResult<()> {
        self.config.validate()?;
        // Store construction checks non-emptiness, per-scene invariants and id uniqueness.
        SceneStore::new(self.scenes.clone()).map(|_| ())
    }

    /// Split into a validated store plus settings and config.
    pub fn into_parts(self) -> ReelResult<(SceneStore, GlobalSettings, EngineConfig)> {
        self.config.validate()?;
        let store = SceneStore::new(self.scenes)?;
        Ok((store, self.settings, self.config))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/storyboard.rs"]
mod tests;
