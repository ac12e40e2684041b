use crate::{
    decoration::cycle::{CyclePhase, KeyedCycle},
    foundation::core::{SceneId, SessionId},
    playback::scheduler::PlaybackTick,
    playback::timeline::Timeline,
    scene::model::{GlobalDecoration, GlobalSettings, Scene, SceneDecoration},
};

/// How long one cycle of a scene-scoped decoration lasts.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum CycleLength {
    /// Constant cycle in milliseconds.
    Fixed(f64),
    /// One cycle spans the owning scene.
    SceneDuration,
}

/// Cycle length of a scene decoration; `None` for [`SceneDecoration::None`].
pub fn scene_cycle(decoration: SceneDecoration) -> Option<CycleLength> {
    match decoration {
        SceneDecoration::None => None,
        SceneDecoration::Sparkle => Some(CycleLength::Fixed(1200.0)),
        SceneDecoration::Confetti => Some(CycleLength::Fixed(3000.0)),
        SceneDecoration::Hearts => Some(CycleLength::Fixed(2400.0)),
        SceneDecoration::Spotlight => Some(CycleLength::SceneDuration),
    }
}

/// A live decoration and where it is in its cycle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DecorationState<D> {
    /// Which decoration is running.
    pub decoration: D,
    /// Cycle position.
    pub cycle: CyclePhase,
}

/// Decoration output attached to a playback tick. Absent decorations are `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct DecorationFrame {
    /// Decoration of the active scene.
    pub scene: Option<DecorationState<SceneDecoration>>,
    /// Video-wide decoration.
    pub global: Option<DecorationState<GlobalDecoration>>,
}

impl DecorationFrame {
    /// True when nothing is drawn.
    pub fn is_empty(&self) -> bool {
        self.scene.is_none() && self.global.is_none()
    }
}

/// Identity of a running scene cycle: session, active index, scene, decoration and cycle length
/// bits.
type SceneCycleKey = (SessionId, usize, SceneId, SceneDecoration, u64);

/// Derives decoration timing from scheduler ticks.
///
/// Scene decorations restart when their scene becomes active, and when the scene's decoration or
/// its cycle length changes while it is shown. The global decoration restarts at
/// every session start and cycles over the total duration captured at that point.
#[derive(Debug, Default)]
pub struct DecorationSync {
    scene: KeyedCycle<SceneCycleKey>,
    global: KeyedCycle<SessionId>,
}

impl DecorationSync {
    /// Fresh sync state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoration state for `tick`, reading the scene list as it is now.
    pub fn sample(
        &mut self,
        tick: &PlaybackTick,
        scenes: &[Scene],
        settings: &GlobalSettings,
    ) -> DecorationFrame {
        DecorationFrame {
            scene: self.sample_scene(tick, scenes),
            global: self.sample_global(tick, scenes, settings.decoration),
        }
    }

    fn sample_scene(
        &mut self,
        tick: &PlaybackTick,
        scenes: &[Scene],
    ) -> Option<DecorationState<SceneDecoration>> {
        let scene = scenes.get(tick.active_index)?;
        let Some(length) = scene_cycle(scene.decoration) else {
            self.scene.reset();
            return None;
        };
        let cycle_ms = match length {
            CycleLength::Fixed(ms) => ms,
            CycleLength::SceneDuration => scene.duration_ms(),
        };
        let key = (
            tick.session_id,
            tick.active_index,
            scene.id,
            scene.decoration,
            cycle_ms.to_bits(),
        );
        let cycle = self.scene.sync(key, tick.elapsed_ms, || {
            let origin = Timeline::new(scenes)
                .scene_start_ms(tick.active_index)
                .unwrap_or(tick.elapsed_ms);
            (origin, cycle_ms)
        });
        Some(DecorationState {
            decoration: scene.decoration,
            cycle,
        })
    }

    fn sample_global(
        &mut self,
        tick: &PlaybackTick,
        scenes: &[Scene],
        decoration: GlobalDecoration,
    ) -> Option<DecorationState<GlobalDecoration>> {
        if decoration == GlobalDecoration::None {
            self.global.reset();
            return None;
        }
        let cycle = self.global.sync(tick.session_id, tick.elapsed_ms, || {
            let total_ms = Timeline::new(scenes).total_ms();
            tracing::debug!(
                session = tick.session_id.0,
                total_ms,
                "global decoration cycle restarted"
            );
            (0.0, total_ms)
        });
        Some(DecorationState { decoration, cycle })
    }

    /// Forget every cycle; the next tick restarts all decorations.
    pub fn reset(&mut self) {
        self.scene.reset();
        self.global.reset();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decoration/sync.rs"]
mod tests;
