//! Time-driven scene playback.
//!
//! The scheduler never owns a timer. The host hands it a [`FrameHost`] to request per-frame
//! callbacks and passes the returned [`FrameRequest`] token back into
//! [`PlaybackScheduler::step`]; a token that is no longer outstanding is ignored, which is how
//! cancellation and restarts stay race-free.

pub(crate) mod host;
pub(crate) mod scheduler;
pub(crate) mod timeline;
