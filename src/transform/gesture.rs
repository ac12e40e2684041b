use std::collections::BTreeMap;

use crate::{
    config::TransformConfig,
    foundation::core::{Point, PointerId, SceneId},
    foundation::error::{ReelError, ReelResult},
    scene::model::{GroupLayout, SceneUpdate, WordOverride},
    scene::store::SceneStore,
    transform::space::{clamp_components, handle_rotation_deg, screen_to_local},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Which layer a pointer-down on the canvas manipulates. The two modes are mutually exclusive.
pub enum EditMode {
    /// Whole text block: move, rotate, scale.
    #[default]
    Group,
    /// Individual words: move.
    Word,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Gesture interpretation.
pub enum GestureKind {
    /// Translate the block by the screen delta.
    GroupMove,
    /// Set the block rotation from the pointer angle around its center.
    GroupRotate,
    /// Scale the block from the vertical drag distance.
    GroupScale,
    /// Translate one word inside the block's local frame.
    WordMove,
}

impl GestureKind {
    /// Edit mode in which this gesture may start.
    pub fn required_mode(self) -> EditMode {
        match self {
            Self::GroupMove | Self::GroupRotate | Self::GroupScale => EditMode::Group,
            Self::WordMove => EditMode::Word,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
/// What a gesture manipulates.
pub enum GestureTarget {
    /// A scene's text block.
    Group(SceneId),
    /// One word of a scene.
    Word {
        /// Owning scene.
        scene: SceneId,
        /// Word index within the caption.
        index: usize,
    },
}

impl GestureTarget {
    /// Scene the target belongs to.
    pub fn scene(self) -> SceneId {
        match self {
            Self::Group(scene) | Self::Word { scene, .. } => scene,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Pointer-down event that opens a gesture.
pub struct GestureBegin {
    /// Pointer that owns the gesture.
    pub pointer: PointerId,
    /// Interpretation of subsequent moves.
    pub kind: GestureKind,
    /// Manipulated block or word.
    pub target: GestureTarget,
    /// Pointer position at pointer-down, screen space.
    pub at: Point,
    /// Screen-space center of the group. Required by [`GestureKind::GroupRotate`], ignored by
    /// the other kinds.
    pub pivot: Option<Point>,
}

impl GestureBegin {
    /// Gesture without a pivot. Rotation gestures also need [`GestureBegin::with_pivot`].
    pub fn new(pointer: PointerId, kind: GestureKind, target: GestureTarget, at: Point) -> Self {
        Self {
            pointer,
            kind,
            target,
            at,
            pivot: None,
        }
    }

    /// Set the rotation pivot.
    pub fn with_pivot(mut self, pivot: Point) -> Self {
        self.pivot = Some(pivot);
        self
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Layout record produced by a gesture move; a full replacement of the manipulated record.
pub enum LayoutUpdate {
    /// New group layout for a scene.
    Group {
        /// Scene to update.
        scene: SceneId,
        /// Replacement layout.
        layout: GroupLayout,
    },
    /// New override for one word.
    Word {
        /// Scene to update.
        scene: SceneId,
        /// Word index.
        index: usize,
        /// Replacement override.
        word: WordOverride,
    },
}

impl LayoutUpdate {
    /// Scene the update applies to.
    pub fn scene(&self) -> SceneId {
        match self {
            Self::Group { scene, .. } | Self::Word { scene, .. } => *scene,
        }
    }

    /// Write the record into the store.
    pub fn apply(self, store: &mut SceneStore) -> ReelResult<()> {
        match self {
            Self::Group { scene, layout } => store.update(scene, SceneUpdate::GroupLayout(layout)),
            Self::Word { scene, index, word } => store.set_word_override(scene, index, word),
        }
    }
}

#[derive(Clone, Debug)]
enum Snapshot {
    Group(GroupLayout),
    Word {
        group_rotation: f64,
        group_scale: f64,
        word: WordOverride,
    },
}

#[derive(Clone, Debug)]
struct ActiveGesture {
    kind: GestureKind,
    target: GestureTarget,
    start: Point,
    pivot: Point,
    snapshot: Snapshot,
}

/// Turns pointer gestures into layout records.
///
/// Holds one gesture per pointer and at most one per target. The controller never mutates the
/// store; callers apply the returned [`LayoutUpdate`]s.
#[derive(Debug, Default)]
pub struct TransformController {
    config: TransformConfig,
    active: BTreeMap<PointerId, ActiveGesture>,
}

impl TransformController {
    /// Controller with the given tunables.
    pub fn new(config: TransformConfig) -> Self {
        Self {
            config,
            active: BTreeMap::new(),
        }
    }

    /// Gesture tunables.
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Number of gestures in progress.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Target currently held by `pointer`.
    pub fn target_of(&self, pointer: PointerId) -> Option<GestureTarget> {
        self.active.get(&pointer).map(|g| g.target)
    }

    /// Open a gesture.
    ///
    /// Rejected when `kind` does not belong to `mode`, the scene is unknown, the word index is
    /// not a word of the current text, or a rotation has no pivot. A gesture already holding the same target is ended first.
    #[tracing::instrument(skip(self, store), fields(pointer = begin.pointer.0))]
    pub fn begin(
        &mut self,
        mode: EditMode,
        store: &SceneStore,
        begin: GestureBegin,
    ) -> ReelResult<()> {
        if begin.kind.required_mode() != mode {
            return Err(ReelError::gesture(format!(
                "{:?} is not available in {mode:?} edit mode",
                begin.kind
            )));
        }

        let pivot = match (begin.kind, begin.pivot) {
            (GestureKind::GroupRotate, None) => {
                return Err(ReelError::gesture("group-rotate needs a pivot"));
            }
            (_, pivot) => pivot.unwrap_or(begin.at),
        };

        let scene_id = begin.target.scene();
        let scene = store
            .get(scene_id)
            .ok_or_else(|| ReelError::scene_op(format!("unknown scene id {}", scene_id.0)))?;

        let snapshot = match (begin.kind, begin.target) {
            (GestureKind::WordMove, GestureTarget::Word { index, .. }) => {
                if index >= scene.word_count() {
                    return Err(ReelError::gesture(format!(
                        "word index {index} is beyond the caption"
                    )));
                }
                Snapshot::Word {
                    group_rotation: scene.group_layout.rotation,
                    group_scale: scene.group_layout.scale,
                    word: scene.word_layouts.get(&index).cloned().unwrap_or_default(),
                }
            }
            (GestureKind::WordMove, GestureTarget::Group(_)) => {
                return Err(ReelError::gesture("word-move needs a word target"));
            }
            (_, GestureTarget::Group(_)) => Snapshot::Group(scene.group_layout.clone()),
            (_, GestureTarget::Word { .. }) => {
                return Err(ReelError::gesture("group gestures need a group target"));
            }
        };

        self.active.retain(|_, g| g.target != begin.target);
        self.active.insert(
            begin.pointer,
            ActiveGesture {
                kind: begin.kind,
                target: begin.target,
                start: begin.at,
                pivot,
                snapshot,
            },
        );
        Ok(())
    }

    /// Pointer moved to `at`. Returns the updated record, or `None` when the pointer holds no
    /// gesture.
    pub fn move_to(&self, pointer: PointerId, at: Point) -> Option<LayoutUpdate> {
        let Some(g) = self.active.get(&pointer) else {
            tracing::debug!(pointer = pointer.0, "move without an active gesture");
            return None;
        };
        let delta = at - g.start;
        let scene = g.target.scene();
        let cfg = &self.config;

        let update = match (&g.snapshot, g.target) {
            (Snapshot::Group(initial), _) => {
                let mut layout = initial.clone();
                match g.kind {
                    GestureKind::GroupMove => {
                        let p = clamp_components(initial.position() + delta, cfg.move_limit_px);
                        layout.x = p.x;
                        layout.y = p.y;
                    }
                    GestureKind::GroupRotate => {
                        layout.rotation = handle_rotation_deg(g.pivot, at);
                    }
                    GestureKind::GroupScale => {
                        layout.scale = (initial.scale + delta.y * cfg.scale_per_px)
                            .clamp(cfg.min_scale, cfg.max_scale);
                    }
                    GestureKind::WordMove => return None,
                }
                LayoutUpdate::Group { scene, layout }
            }
            (
                Snapshot::Word {
                    group_rotation,
                    group_scale,
                    word,
                },
                GestureTarget::Word { index, .. },
            ) => {
                let local = screen_to_local(delta, *group_rotation, *group_scale);
                let offset = word.offset() + local;
                let word = WordOverride {
                    x: Some(offset.x),
                    y: Some(offset.y),
                    ..word.clone()
                };
                LayoutUpdate::Word { scene, index, word }
            }
            (Snapshot::Word { .. }, GestureTarget::Group(_)) => return None,
        };
        Some(update)
    }

    /// Close the pointer's gesture. Returns false when it held none.
    pub fn end(&mut self, pointer: PointerId) -> bool {
        let ended = self.active.remove(&pointer).is_some();
        if !ended {
            tracing::debug!(pointer = pointer.0, "end without an active gesture");
        }
        ended
    }

    /// Drop every gesture that targets `scene` (e.g. after it was removed).
    pub fn cancel_scene(&mut self, scene: SceneId) {
        self.active.retain(|_, g| g.target.scene() != scene);
    }

    /// Drop all gestures.
    pub fn cancel_all(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/gesture.rs"]
mod tests;
