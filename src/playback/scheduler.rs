use crate::{
    config::PlaybackConfig,
    foundation::core::SessionId,
    playback::host::{FrameHost, FrameRequest},
    playback::timeline::Timeline,
    scene::model::Scene,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
/// Observable scheduler state.
pub struct PlaybackState {
    /// True between `start` and either `stop` or the end of the timeline.
    pub is_playing: bool,
    /// Scene currently shown. Kept on the last viewed scene after playback ends.
    pub active_scene_index: usize,
    /// Milliseconds since session start; non-decreasing within a session.
    pub elapsed_ms: f64,
    /// Generation of the current (or most recent) session.
    pub session_id: SessionId,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// One scheduler emission.
pub struct PlaybackTick {
    /// Session this tick belongs to.
    pub session_id: SessionId,
    /// Active scene index.
    pub active_index: usize,
    /// Timeline progress in `[0, 1]`.
    pub progress: f64,
    /// Milliseconds since session start.
    pub elapsed_ms: f64,
    /// Set on the final tick of a session that ran to completion.
    pub finished: bool,
}

/// Cooperative playback scheduler.
///
/// Holds at most one outstanding [`FrameRequest`]. `start` always cancels it before requesting a
/// new one, and `step` only accepts the outstanding token, so two sessions can never advance the
/// same scheduler.
#[derive(Debug)]
pub struct PlaybackScheduler {
    config: PlaybackConfig,
    state: PlaybackState,
    progress: f64,
    started_at_ms: f64,
    pending: Option<FrameRequest>,
}

impl PlaybackScheduler {
    /// Idle scheduler.
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            config,
            state: PlaybackState::default(),
            progress: 0.0,
            started_at_ms: 0.0,
            pending: None,
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Last emitted progress.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Whether a session is running.
    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    /// The frame token the scheduler is waiting for, if any.
    pub fn pending_request(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// Scheduler settings.
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    fn cancel_pending(&mut self, host: &mut dyn FrameHost) {
        if let Some(req) = self.pending.take() {
            host.cancel_frame(req);
        }
    }

    fn tick(&self, finished: bool) -> PlaybackTick {
        PlaybackTick {
            session_id: self.state.session_id,
            active_index: self.state.active_scene_index,
            progress: self.progress,
            elapsed_ms: self.state.elapsed_ms,
            finished,
        }
    }

    /// Begin a new session at `now_ms`. No-op on an empty scene list.
    ///
    /// Returns the initial tick (scene 0, progress 0).
    #[tracing::instrument(skip(self, scenes, host), fields(scenes = scenes.len()))]
    pub fn start(
        &mut self,
        scenes: &[Scene],
        now_ms: f64,
        host: &mut dyn FrameHost,
    ) -> Option<PlaybackTick> {
        if scenes.is_empty() {
            tracing::debug!("start ignored: empty scene list");
            return None;
        }

        self.cancel_pending(host);
        self.started_at_ms = now_ms;
        self.progress = 0.0;
        self.state = PlaybackState {
            is_playing: true,
            active_scene_index: 0,
            elapsed_ms: 0.0,
            session_id: self.state.session_id.next(),
        };
        self.pending = Some(host.request_frame());
        tracing::debug!(session = self.state.session_id.0, "playback session started");
        Some(self.tick(false))
    }

    /// Cancel the pending step and reset progress, keeping the active scene index.
    ///
    /// Returns false when there was no session to stop.
    #[tracing::instrument(skip(self, host))]
    pub fn stop(&mut self, host: &mut dyn FrameHost) -> bool {
        if !self.state.is_playing && self.pending.is_none() {
            return false;
        }
        self.cancel_pending(host);
        self.state.is_playing = false;
        self.state.elapsed_ms = 0.0;
        self.progress = 0.0;
        tracing::debug!(session = self.state.session_id.0, "playback session stopped");
        true
    }

    /// Advance to `now_ms` in response to the host firing `request`.
    ///
    /// Stray or stale requests return `None` and change nothing. Durations are read live from
    /// `scenes` on every step.
    pub fn step(
        &mut self,
        request: FrameRequest,
        now_ms: f64,
        scenes: &[Scene],
        host: &mut dyn FrameHost,
    ) -> Option<PlaybackTick> {
        if self.pending != Some(request) {
            tracing::debug!(request = request.0, "ignoring stray frame callback");
            return None;
        }
        self.pending = None;

        let timeline = Timeline::new(scenes);
        let Some(last) = timeline.len().checked_sub(1) else {
            self.state.is_playing = false;
            self.progress = 0.0;
            return None;
        };

        // A host clock that runs behind the session start reads as zero, and elapsed time never
        // moves backwards within a session.
        let raw = (now_ms - self.started_at_ms).max(0.0);
        let elapsed = raw.max(self.state.elapsed_ms);
        self.state.elapsed_ms = elapsed;

        let total = timeline.total_ms();
        if elapsed >= total + self.config.end_buffer_ms {
            self.state.is_playing = false;
            self.state.active_scene_index = last;
            self.progress = 1.0;
            tracing::debug!(
                session = self.state.session_id.0,
                elapsed_ms = elapsed,
                "playback reached end of timeline"
            );
            return Some(self.tick(true));
        }

        self.state.active_scene_index = timeline.locate(elapsed).unwrap_or(last);
        self.progress = timeline.progress(elapsed);
        self.pending = Some(host.request_frame());
        Some(self.tick(false))
    }
}

impl Default for PlaybackScheduler {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
