//! reelkit is the playback and transform engine behind a short-form caption video editor.
//!
//! A storyboard is an ordered list of timed [`Scene`]s. The engine provides:
//!
//! - A cooperative [`PlaybackScheduler`] that maps host clock readings to the active scene and
//!   timeline progress, driven through a [`FrameHost`]
//! - A [`TransformController`] turning pointer gestures into group and per-word layout records
//! - [`curve`] offsets and [`resolve_words`] for painting captions
//! - [`DecorationSync`] timing for scene and video-wide overlays
//! - The [`Editor`] facade tying these to an owned, versioned [`SceneStore`]
//!
//! Painting, audio capture and export belong to the host.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod cue;
pub(crate) mod decoration;
pub(crate) mod editor;
pub(crate) mod playback;
pub(crate) mod scene;
pub(crate) mod text;
pub(crate) mod transform;

pub use crate::foundation::core::{Affine, Canvas, Point, PointerId, SceneId, SessionId, Vec2};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::entrance::{
    Entrance, EntranceSample, WORD_STAGGER_MS, sample as sample_entrance, word_delay_ms,
};
pub use crate::config::{DEFAULT_END_BUFFER_MS, EngineConfig, PlaybackConfig, TransformConfig};
pub use crate::cue::{COUNTDOWN_FROM, COUNTDOWN_STEP_MS, CuePhase, DubCue};
pub use crate::decoration::cycle::{CyclePhase, KeyedCycle};
pub use crate::decoration::sync::{
    CycleLength, DecorationFrame, DecorationState, DecorationSync, scene_cycle,
};
pub use crate::editor::{Editor, ListenerId, Tick};
pub use crate::playback::host::{FrameHost, FrameRequest, ManualFrameHost, PlaybackControl};
pub use crate::playback::scheduler::{PlaybackScheduler, PlaybackState, PlaybackTick};
pub use crate::playback::timeline::Timeline;
pub use crate::scene::color::ColorDef;
pub use crate::scene::model::{
    Align, AnimationId, AspectRatio, DEFAULT_FONT_SIZE, DEFAULT_SCENE_DURATION_S, GlobalDecoration,
    GlobalSettings, GroupLayout, MAX_SCENE_DURATION_S, MIN_SCENE_DURATION_S, Scene,
    SceneDecoration, SceneUpdate, Shadow, Theme, WordOverride, clamp_duration, total_duration_ms,
    total_duration_s,
};
pub use crate::scene::store::{Direction, SceneStore};
pub use crate::scene::storyboard::Storyboard;
pub use crate::text::curve::{CharOffset, curve};
pub use crate::text::words::{ColorRole, ResolvedWord, WordColor, resolve_words};
pub use crate::transform::gesture::{
    EditMode, GestureBegin, GestureKind, GestureTarget, LayoutUpdate, TransformController,
};
pub use crate::transform::space::{
    clamp_components, handle_rotation_deg, local_to_screen, screen_to_local,
};

