//! Single-threaded editing and playback facade.
//!
//! [`Editor`] owns the scene store and wires the scheduler, gesture controller and decoration sync
//! together. Rejected operations are logged and reported as `false`; none of them reach the host
//! as an error, and none of them change state.

use std::fmt;

use crate::{
    config::EngineConfig,
    decoration::sync::{DecorationFrame, DecorationSync},
    foundation::core::{Point, PointerId, SceneId, SessionId},
    foundation::error::ReelResult,
    playback::host::{FrameHost, FrameRequest, PlaybackControl},
    playback::scheduler::{PlaybackScheduler, PlaybackState, PlaybackTick},
    scene::model::{AspectRatio, GlobalDecoration, GlobalSettings, Scene, SceneUpdate},
    scene::store::{Direction, SceneStore},
    scene::storyboard::Storyboard,
    text::words::{ResolvedWord, resolve_words},
    transform::gesture::{EditMode, GestureBegin, LayoutUpdate, TransformController},
};

/// Broadcast value delivered to tick listeners.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Tick {
    /// Session the tick belongs to.
    pub session_id: SessionId,
    /// Active scene index.
    pub active_index: usize,
    /// Timeline progress in `[0, 1]`.
    pub progress: f64,
    /// Milliseconds since session start.
    pub elapsed_ms: f64,
    /// Set on the last tick of a session that played to the end.
    pub finished: bool,
    /// Decoration timing for this instant.
    pub decoration: DecorationFrame,
}

/// Handle returned by [`Editor::on_tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type TickListener = Box<dyn FnMut(&Tick)>;

/// Owns the storyboard and drives playback and gestures over it.
pub struct Editor<H: FrameHost> {
    store: SceneStore,
    settings: GlobalSettings,
    config: EngineConfig,
    scheduler: PlaybackScheduler,
    transforms: TransformController,
    decorations: DecorationSync,
    mode: EditMode,
    host: H,
    listeners: Vec<(ListenerId, TickListener)>,
    next_listener: u64,
}

impl<H: FrameHost> fmt::Debug for Editor<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("scenes", &self.store.len())
            .field("version", &self.store.version())
            .field("settings", &self.settings)
            .field("playback", &self.scheduler.state())
            .field("mode", &self.mode)
            .field("gestures", &self.transforms.active_count())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<H: FrameHost> Editor<H> {
    /// Editor over an existing store.
    pub fn new(store: SceneStore, settings: GlobalSettings, config: EngineConfig, host: H) -> Self {
        Self {
            store,
            settings,
            scheduler: PlaybackScheduler::new(config.playback.clone()),
            transforms: TransformController::new(config.transform.clone()),
            config,
            decorations: DecorationSync::new(),
            mode: EditMode::default(),
            host,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Editor over the starter storyboard with default settings.
    pub fn with_starter(host: H) -> Self {
        Self::new(
            SceneStore::starter(),
            GlobalSettings::default(),
            EngineConfig::default(),
            host,
        )
    }

    /// Editor over a loaded storyboard.
    pub fn from_storyboard(storyboard: Storyboard, host: H) -> ReelResult<Self> {
        let (store, settings, config) = storyboard.into_parts()?;
        Ok(Self::new(store, settings, config, host))
    }

    /// Snapshot the current state as a storyboard.
    pub fn to_storyboard(&self) -> Storyboard {
        Storyboard {
            settings: self.settings.clone(),
            scenes: self.store.scenes().to_vec(),
            config: self.config.clone(),
        }
    }

    /// Scene store.
    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    /// Scenes in timeline order.
    pub fn scenes(&self) -> &[Scene] {
        self.store.scenes()
    }

    /// Video-wide settings.
    pub fn settings(&self) -> &GlobalSettings {
        &self.settings
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Scheduler state.
    pub fn playback_state(&self) -> PlaybackState {
        self.scheduler.state()
    }

    /// Last emitted progress.
    pub fn progress(&self) -> f64 {
        self.scheduler.progress()
    }

    /// Whether a session is running.
    pub fn is_playing(&self) -> bool {
        self.scheduler.is_playing()
    }

    /// Scene at the scheduler's active index.
    pub fn active_scene(&self) -> Option<&Scene> {
        self.store
            .scenes()
            .get(self.scheduler.state().active_scene_index)
    }

    /// Resolved words of a scene, ready for painting.
    pub fn resolved_words(&self, id: SceneId) -> Option<Vec<ResolvedWord>> {
        self.store.get(id).map(resolve_words)
    }

    /// Current edit mode.
    pub fn edit_mode(&self) -> EditMode {
        self.mode
    }

    /// Number of gestures in progress.
    pub fn active_gestures(&self) -> usize {
        self.transforms.active_count()
    }

    /// Frame host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Frame host, mutably (e.g. to drain fired requests).
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Register a tick listener. Listeners run in registration order on every tick.
    pub fn on_tick(&mut self, listener: impl FnMut(&Tick) + 'static) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a tick listener. Returns false for unknown handles.
    pub fn remove_tick_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    fn broadcast(&mut self, tick: PlaybackTick) -> Tick {
        let decoration = self
            .decorations
            .sample(&tick, self.store.scenes(), &self.settings);
        let out = Tick {
            session_id: tick.session_id,
            active_index: tick.active_index,
            progress: tick.progress,
            elapsed_ms: tick.elapsed_ms,
            finished: tick.finished,
            decoration,
        };
        self.notify(&out);
        out
    }

    fn notify(&mut self, tick: &Tick) {
        for (_, listener) in &mut self.listeners {
            listener(tick);
        }
    }

    /// Start a new session at `now_ms`, cancelling any running one.
    pub fn start_playback(&mut self, now_ms: f64) -> Option<Tick> {
        let tick = self
            .scheduler
            .start(self.store.scenes(), now_ms, &mut self.host)?;
        Some(self.broadcast(tick))
    }

    /// Stop the running session. Returns false when nothing was playing.
    ///
    /// Listeners get one last tick with progress 0, the active index kept and no decoration.
    pub fn stop_playback(&mut self) -> bool {
        if !self.scheduler.stop(&mut self.host) {
            return false;
        }
        self.decorations.reset();
        let state = self.scheduler.state();
        let tick = Tick {
            session_id: state.session_id,
            active_index: state.active_scene_index,
            progress: self.scheduler.progress(),
            elapsed_ms: state.elapsed_ms,
            finished: false,
            decoration: DecorationFrame::default(),
        };
        self.notify(&tick);
        true
    }

    /// Host callback for a fired frame request.
    pub fn on_frame(&mut self, request: FrameRequest, now_ms: f64) -> Option<Tick> {
        let tick = self
            .scheduler
            .step(request, now_ms, self.store.scenes(), &mut self.host)?;
        Some(self.broadcast(tick))
    }

    /// Open a gesture in the current edit mode.
    pub fn begin_gesture(&mut self, begin: GestureBegin) -> bool {
        match self.transforms.begin(self.mode, &self.store, begin) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(pointer = begin.pointer.0, error = %err, "gesture rejected");
                false
            }
        }
    }

    /// Move a pointer and apply the resulting layout. Returns the applied record.
    pub fn move_gesture(&mut self, pointer: PointerId, at: Point) -> Option<LayoutUpdate> {
        let update = self.transforms.move_to(pointer, at)?;
        match update.clone().apply(&mut self.store) {
            Ok(()) => Some(update),
            Err(err) => {
                tracing::warn!(pointer = pointer.0, error = %err, "gesture update rejected");
                None
            }
        }
    }

    /// Close a pointer's gesture.
    pub fn end_gesture(&mut self, pointer: PointerId) -> bool {
        self.transforms.end(pointer)
    }

    /// Switch edit mode. Gestures in progress are dropped.
    pub fn set_edit_mode(&mut self, mode: EditMode) {
        if self.mode != mode {
            self.transforms.cancel_all();
            self.mode = mode;
        }
    }

    fn applied(op: &'static str, result: ReelResult<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(op, error = %err, "editor operation rejected");
                false
            }
        }
    }

    /// Replace one field of a scene.
    pub fn update_scene(&mut self, id: SceneId, update: SceneUpdate) -> bool {
        Self::applied("update_scene", self.store.update(id, update))
    }

    /// Append a blank scene.
    pub fn add_scene(&mut self) -> SceneId {
        self.store.add()
    }

    /// Remove a scene; the last remaining scene cannot be removed.
    pub fn remove_scene(&mut self, id: SceneId) -> bool {
        let removed = Self::applied("remove_scene", self.store.remove(id).map(|_| ()));
        if removed {
            self.transforms.cancel_scene(id);
        }
        removed
    }

    /// Swap a scene with its neighbour.
    pub fn reorder_scene(&mut self, index: usize, direction: Direction) -> bool {
        Self::applied("reorder_scene", self.store.reorder(index, direction))
    }

    /// Drop one word's override.
    pub fn reset_word_override(&mut self, id: SceneId, word_index: usize) -> bool {
        Self::applied(
            "reset_word_override",
            self.store.reset_word_override(id, word_index),
        )
    }

    /// Drop every word override of a scene.
    pub fn reset_all_word_overrides(&mut self, id: SceneId) -> bool {
        Self::applied(
            "reset_all_word_overrides",
            self.store.reset_all_word_overrides(id),
        )
    }

    /// Drop overrides that no longer address a word. Returns how many went.
    pub fn prune_orphaned_overrides(&mut self, id: SceneId) -> usize {
        match self.store.prune_orphaned_overrides(id) {
            Ok(n) => n,
            Err(err) => {
                tracing::warn!(
                    op = "prune_orphaned_overrides",
                    error = %err,
                    "editor operation rejected"
                );
                0
            }
        }
    }

    /// Choose the video-wide decoration.
    pub fn set_global_decoration(&mut self, decoration: GlobalDecoration) {
        self.settings.decoration = decoration;
    }

    /// Change the output aspect ratio. Rejected while playing.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: AspectRatio) -> bool {
        if self.scheduler.is_playing() {
            tracing::warn!(?aspect_ratio, "aspect ratio change rejected during playback");
            return false;
        }
        self.settings.aspect_ratio = aspect_ratio;
        true
    }

    /// Stop playback, drop gestures and restore the starter storyboard.
    pub fn reset_storyboard(&mut self) {
        self.stop_playback();
        self.transforms.cancel_all();
        self.decorations.reset();
        self.store.reset_to_starter();
    }
}

impl<H: FrameHost> PlaybackControl for Editor<H> {
    fn start_playback(&mut self, now_ms: f64) {
        Editor::start_playback(self, now_ms);
    }

    fn stop_playback(&mut self) {
        Editor::stop_playback(self);
    }
}

#[cfg(test)]
#[path = "../tests/unit/editor.rs"]
mod tests;
