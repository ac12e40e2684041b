//! Voice-over cue: a countdown that starts playback when recording begins and stops it when
//! recording ends. Audio capture stays with the host.

use crate::playback::host::PlaybackControl;

/// Countdown start value.
pub const COUNTDOWN_FROM: u8 = 3;
/// Length of one countdown step.
pub const COUNTDOWN_STEP_MS: f64 = 1000.0;

/// Where the cue is.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum CuePhase {
    /// Waiting to be armed.
    Idle,
    /// Counting down; `remaining` is the number shown.
    Countdown {
        /// Steps left before recording starts.
        remaining: u8,
    },
    /// Recording while playback runs.
    Recording {
        /// Host time at which recording and playback started.
        started_at_ms: f64,
    },
    /// Recording finished and awaiting keep or retake.
    Review {
        /// Recorded length in whole seconds.
        recorded_secs: u64,
    },
}

/// Countdown-then-record state machine.
#[derive(Clone, Debug)]
pub struct DubCue {
    phase: CuePhase,
    next_step_at_ms: f64,
}

impl Default for DubCue {
    fn default() -> Self {
        Self {
            phase: CuePhase::Idle,
            next_step_at_ms: 0.0,
        }
    }
}

impl DubCue {
    /// Idle cue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> CuePhase {
        self.phase
    }

    /// Start the countdown. Only valid from `Idle`.
    pub fn arm(&mut self, now_ms: f64) -> bool {
        if self.phase != CuePhase::Idle {
            tracing::debug!(phase = ?self.phase, "arm ignored");
            return false;
        }
        self.phase = CuePhase::Countdown {
            remaining: COUNTDOWN_FROM,
        };
        self.next_step_at_ms = now_ms + COUNTDOWN_STEP_MS;
        true
    }

    /// Advance the countdown to `now_ms`. When it runs out, recording begins and playback is
    /// started at `now_ms`.
    pub fn advance(&mut self, now_ms: f64, control: &mut dyn PlaybackControl) -> CuePhase {
        while let CuePhase::Countdown { remaining } = self.phase {
            if now_ms < self.next_step_at_ms {
                break;
            }
            if remaining <= 1 {
                self.phase = CuePhase::Recording {
                    started_at_ms: now_ms,
                };
                tracing::debug!(now_ms, "recording started");
                control.start_playback(now_ms);
            } else {
                self.phase = CuePhase::Countdown {
                    remaining: remaining - 1,
                };
                self.next_step_at_ms += COUNTDOWN_STEP_MS;
            }
        }
        self.phase
    }

    /// End the recording and stop playback. Only valid while recording.
    pub fn finish(&mut self, now_ms: f64, control: &mut dyn PlaybackControl) -> bool {
        let CuePhase::Recording { started_at_ms } = self.phase else {
            tracing::debug!(phase = ?self.phase, "finish ignored");
            return false;
        };
        let recorded_secs = ((now_ms - started_at_ms).max(0.0) / 1000.0).floor() as u64;
        self.phase = CuePhase::Review { recorded_secs };
        control.stop_playback();
        true
    }

    /// Discard a reviewed take and return to `Idle`.
    pub fn retake(&mut self) -> bool {
        if !matches!(self.phase, CuePhase::Review { .. }) {
            return false;
        }
        self.phase = CuePhase::Idle;
        true
    }

    /// Abandon the cue from any phase (e.g. the host could not open a microphone). Stops
    /// playback if recording had started.
    pub fn abort(&mut self, control: &mut dyn PlaybackControl) {
        if matches!(self.phase, CuePhase::Recording { .. }) {
            control.stop_playback();
        }
        self.phase = CuePhase::Idle;
    }
}

#[cfg(test)]
#[path = "../tests/unit/cue.rs"]
mod tests;
