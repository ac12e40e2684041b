//! Timing for animated overlays bound to one scene or to the whole video.

pub(crate) mod cycle;
pub(crate) mod sync;
