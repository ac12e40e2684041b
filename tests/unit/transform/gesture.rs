use super::*;
use crate::foundation::core::Vec2;
use crate::scene::model::Scene;

const P1: PointerId = PointerId(1);
const P2: PointerId = PointerId(2);

fn store_with(group: GroupLayout) -> SceneStore {
    let scene = Scene {
        group_layout: group,
        ..Scene::new(SceneId(1), "alpha beta gamma", 2.0).unwrap()
    };
    SceneStore::new(vec![scene, Scene::new(SceneId(2), "other", 2.0).unwrap()]).unwrap()
}

fn word_target(index: usize) -> GestureTarget {
    GestureTarget::Word {
        scene: SceneId(1),
        index,
    }
}

fn expect_word(update: Option<LayoutUpdate>) -> WordOverride {
    match update {
        Some(LayoutUpdate::Word { word, .. }) => word,
        other => panic!("expected word update, got {other:?}"),
    }
}

fn expect_group(update: Option<LayoutUpdate>) -> GroupLayout {
    match update {
        Some(LayoutUpdate::Group { layout, .. }) => layout,
        other => panic!("expected group update, got {other:?}"),
    }
}

#[test]
fn group_move_adds_screen_delta_and_clamps() {
    let store = store_with(GroupLayout {
        x: 10.0,
        y: 20.0,
        ..GroupLayout::default()
    });
    let mut tc = TransformController::default();
    let begin = GestureBegin::new(
        P1,
        GestureKind::GroupMove,
        GestureTarget::Group(SceneId(1)),
        Point::new(100.0, 100.0),
    );
    tc.begin(EditMode::Group, &store, begin).unwrap();

    let layout = expect_group(tc.move_to(P1, Point::new(130.0, 80.0)));
    assert_eq!((layout.x, layout.y), (40.0, 0.0));

    let layout = expect_group(tc.move_to(P1, Point::new(5000.0, -5000.0)));
    assert_eq!((layout.x, layout.y), (1000.0, -1000.0));
}

#[test]
fn group_rotate_is_absolute_not_delta() {
    let store = store_with(GroupLayout {
        rotation: 45.0,
        ..GroupLayout::default()
    });
    let mut tc = TransformController::default();
    let center = Point::new(200.0, 200.0);
    let begin = GestureBegin::new(
        P1,
        GestureKind::GroupRotate,
        GestureTarget::Group(SceneId(1)),
        Point::new(200.0, 100.0),
    )
    .with_pivot(center);
    tc.begin(EditMode::Group, &store, begin).unwrap();

    let layout = expect_group(tc.move_to(P1, Point::new(300.0, 200.0)));
    assert!((layout.rotation - 90.0).abs() < 1e-9);
    let layout = expect_group(tc.move_to(P1, Point::new(200.0, 50.0)));
    assert!(layout.rotation.abs() < 1e-9);
}

#[test]
fn group_rotate_without_pivot_is_rejected() {
    let store = store_with(GroupLayout::default());
    let mut tc = TransformController::default();
    let begin = GestureBegin::new(
        P1,
        GestureKind::GroupRotate,
        GestureTarget::Group(SceneId(1)),
        Point::new(200.0, 100.0),
    );
    let err = tc.begin(EditMode::Group, &store, begin).unwrap_err();
    assert!(matches!(err, ReelError::Gesture(_)));
    assert_eq!(tc.active_count(), 0);
    assert!(tc.move_to(P1, Point::new(300.0, 200.0)).is_none());
}

#[test]
fn group_scale_is_monotonic_and_bounded() {
    let store = store_with(GroupLayout::default());
    let mut tc = TransformController::default();
    let begin = GestureBegin::new(
        P1,
        GestureKind::GroupScale,
        GestureTarget::Group(SceneId(1)),
        Point::new(0.0, 0.0),
    );
    tc.begin(EditMode::Group, &store, begin).unwrap();

    let mut last = 0.0;
    for dy in [-50.0, 0.0, 25.0, 50.0, 100.0] {
        let s = expect_group(tc.move_to(P1, Point::new(0.0, dy))).scale;
        assert!(s >= last, "scale must grow with downward drag");
        last = s;
    }
    assert!((expect_group(tc.move_to(P1, Point::new(0.0, 50.0))).scale - 1.5).abs() < 1e-9);
    assert_eq!(expect_group(tc.move_to(P1, Point::new(0.0, 9999.0))).scale, 5.0);
    assert_eq!(expect_group(tc.move_to(P1, Point::new(0.0, -9999.0))).scale, 0.2);
}

#[test]
fn word_move_identity_frame_uses_screen_delta() {
    let store = store_with(GroupLayout::default());
    let mut tc = TransformController::default();
    let begin = GestureBegin::new(
        P1,
        GestureKind::WordMove,
        word_target(1),
        Point::new(50.0, 50.0),
    );
    tc.begin(EditMode::Word, &store, begin).unwrap();

    let word = expect_word(tc.move_to(P1, Point::new(62.0, 41.0)));
    assert_eq!(word.offset(), Vec2::new(12.0, -9.0));
}

#[test]
fn word_move_in_rotated_group_maps_to_local_frame() {
    let store = store_with(GroupLayout {
        rotation: 90.0,
        ..GroupLayout::default()
    });
    let mut tc = TransformController::default();
    let begin = GestureBegin::new(P1, GestureKind::WordMove, word_target(0), Point::ZERO);
    tc.begin(EditMode::Word, &store, begin).unwrap();

    let word = expect_word(tc.move_to(P1, Point::new(10.0, 0.0)));
    assert!(word.x.unwrap().abs() < 1e-9);
    assert!((word.y.unwrap() + 10.0).abs() < 1e-9);
}

#[test]
fn word_move_adds_to_existing_offset_and_keeps_other_fields() {
    let mut store = store_with(GroupLayout {
        scale: 2.0,
        ..GroupLayout::default()
    });
    store
        .set_word_override(
            SceneId(1),
            2,
            WordOverride {
                x: Some(5.0),
                y: Some(5.0),
                curve: Some(12.0),
                ..WordOverride::default()
            },
        )
        .unwrap();
    let mut tc = TransformController::default();
    let begin = GestureBegin::new(P1, GestureKind::WordMove, word_target(2), Point::ZERO);
    tc.begin(EditMode::Word, &store, begin).unwrap();

    let word = expect_word(tc.move_to(P1, Point::new(10.0, -4.0)));
    assert_eq!(word.offset(), Vec2::new(10.0, 3.0));
    assert_eq!(word.curve, Some(12.0));
}

#[test]
fn edit_mode_gates_gesture_kinds() {
    let store = store_with(GroupLayout::default());
    let mut tc = TransformController::default();
    let word = GestureBegin::new(P1, GestureKind::WordMove, word_target(0), Point::ZERO);
    assert!(tc.begin(EditMode::Group, &store, word).is_err());
    let group = GestureBegin::new(
        P1,
        GestureKind::GroupMove,
        GestureTarget::Group(SceneId(1)),
        Point::ZERO,
    );
    assert!(tc.begin(EditMode::Word, &store, group).is_err());
    assert_eq!(tc.active_count(), 0);
}

#[test]
fn begin_rejects_unknown_scene_and_out_of_range_word() {
    let store = store_with(GroupLayout::default());
    let mut tc = TransformController::default();
    let unknown = GestureBegin::new(
        P1,
        GestureKind::GroupMove,
        GestureTarget::Group(SceneId(99)),
        Point::ZERO,
    );
    assert!(tc.begin(EditMode::Group, &store, unknown).is_err());
    let beyond = GestureBegin::new(P1, GestureKind::WordMove, word_target(3), Point::ZERO);
    assert!(tc.begin(EditMode::Word, &store, beyond).is_err());
}

#[test]
fn same_target_begin_replaces_prior_gesture() {
    let store = store_with(GroupLayout::default());
    let mut tc = TransformController::default();
    let target = GestureTarget::Group(SceneId(1));
    tc.begin(
        EditMode::Group,
        &store,
        GestureBegin::new(P1, GestureKind::GroupMove, target, Point::ZERO),
    )
    .unwrap();
    tc.begin(
        EditMode::Group,
        &store,
        GestureBegin::new(P2, GestureKind::GroupScale, target, Point::ZERO),
    )
    .unwrap();

    assert_eq!(tc.active_count(), 1);
    assert!(tc.move_to(P1, Point::new(1.0, 1.0)).is_none());
    assert_eq!(tc.target_of(P2), Some(target));
}

#[test]
fn independent_targets_run_concurrently() {
    let store = store_with(GroupLayout::default());
    let mut tc = TransformController::default();
    tc.begin(
        EditMode::Group,
        &store,
        GestureBegin::new(
            P1,
            GestureKind::GroupMove,
            GestureTarget::Group(SceneId(1)),
            Point::ZERO,
        ),
    )
    .unwrap();
    tc.begin(
        EditMode::Group,
        &store,
        GestureBegin::new(
            P2,
            GestureKind::GroupMove,
            GestureTarget::Group(SceneId(2)),
            Point::ZERO,
        ),
    )
    .unwrap();

    assert_eq!(tc.move_to(P1, Point::new(1.0, 0.0)).unwrap().scene(), SceneId(1));
    assert_eq!(tc.move_to(P2, Point::new(1.0, 0.0)).unwrap().scene(), SceneId(2));
}

#[test]
fn move_and_end_without_begin_are_no_ops() {
    let mut tc = TransformController::default();
    assert!(tc.move_to(P1, Point::new(1.0, 1.0)).is_none());
    assert!(!tc.end(P1));
}

#[test]
fn applied_updates_land_in_the_store() {
    let mut store = store_with(GroupLayout::default());
    let mut tc = TransformController::default();
    tc.begin(
        EditMode::Word,
        &store,
        GestureBegin::new(P1, GestureKind::WordMove, word_target(1), Point::ZERO),
    )
    .unwrap();
    let update = tc.move_to(P1, Point::new(4.0, 4.0)).unwrap();
    update.apply(&mut store).unwrap();
    assert!(tc.end(P1));
    assert_eq!(
        store.get(SceneId(1)).unwrap().word_layouts[&1].offset(),
        Vec2::new(4.0, 4.0)
    );
}

#[test]
fn cancel_scene_drops_its_gestures() {
    let store = store_with(GroupLayout::default());
    let mut tc = TransformController::default();
    tc.begin(
        EditMode::Word,
        &store,
        GestureBegin::new(P1, GestureKind::WordMove, word_target(0), Point::ZERO),
    )
    .unwrap();
    tc.cancel_scene(SceneId(1));
    assert_eq!(tc.active_count(), 0);
}
