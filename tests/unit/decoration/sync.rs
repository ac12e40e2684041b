use super::*;

fn scenes(durations: &[f64]) -> Vec<Scene> {
    durations
        .iter()
        .zip(1u64..)
        .map(|(&d, id)| Scene::new(SceneId(id), "words here", d).unwrap())
        .collect()
}

fn tick(session: u64, active_index: usize, elapsed_ms: f64) -> PlaybackTick {
    PlaybackTick {
        session_id: SessionId(session),
        active_index,
        progress: 0.0,
        elapsed_ms,
        finished: false,
    }
}

fn starfield() -> GlobalSettings {
    GlobalSettings {
        decoration: GlobalDecoration::Starfield,
        ..GlobalSettings::default()
    }
}

#[test]
fn none_emits_nothing() {
    let s = scenes(&[1.0, 2.0]);
    let mut sync = DecorationSync::new();
    let frame = sync.sample(&tick(1, 0, 100.0), &s, &GlobalSettings::default());
    assert!(frame.is_empty());
}

#[test]
fn global_cycle_is_total_at_session_start() {
    let mut s = scenes(&[1.5, 3.0, 2.0]);
    let mut sync = DecorationSync::new();
    let settings = starfield();

    let g = sync.sample(&tick(1, 0, 0.0), &s, &settings).global.unwrap();
    assert_eq!(g.cycle.cycle_ms, 6500.0);
    assert_eq!(g.cycle.phase, 0.0);

    // Edits during the session do not change the running cycle.
    s[0].duration = 4.0;
    let g = sync.sample(&tick(1, 1, 3250.0), &s, &settings).global.unwrap();
    assert_eq!(g.cycle.cycle_ms, 6500.0);
    assert!((g.cycle.phase - 0.5).abs() < 1e-12);

    // The next session picks up the live sum and restarts at zero.
    let g = sync.sample(&tick(2, 0, 0.0), &s, &settings).global.unwrap();
    assert_eq!(g.cycle.cycle_ms, 9000.0);
    assert_eq!(g.cycle.local_ms, 0.0);
}

#[test]
fn restart_never_continues_mid_cycle() {
    let s = scenes(&[2.0]);
    let mut sync = DecorationSync::new();
    let settings = starfield();
    sync.sample(&tick(1, 0, 0.0), &s, &settings);
    let before = sync.sample(&tick(1, 0, 1500.0), &s, &settings).global.unwrap();
    assert!(before.cycle.phase > 0.7);

    let after = sync.sample(&tick(2, 0, 0.0), &s, &settings).global.unwrap();
    assert_eq!(after.cycle.phase, 0.0);
}

#[test]
fn scene_decoration_uses_fixed_or_scene_cycle() {
    let mut s = scenes(&[1.0, 3.0]);
    s[0].decoration = SceneDecoration::Sparkle;
    s[1].decoration = SceneDecoration::Spotlight;
    let mut sync = DecorationSync::new();
    let settings = GlobalSettings::default();

    let d = sync.sample(&tick(1, 0, 600.0), &s, &settings).scene.unwrap();
    assert_eq!(d.decoration, SceneDecoration::Sparkle);
    assert_eq!(d.cycle.cycle_ms, 1200.0);
    assert!((d.cycle.phase - 0.5).abs() < 1e-12);

    // Second scene starts at 1000ms; its spotlight spans the scene.
    let d = sync.sample(&tick(1, 1, 2500.0), &s, &settings).scene.unwrap();
    assert_eq!(d.decoration, SceneDecoration::Spotlight);
    assert_eq!(d.cycle.cycle_ms, 3000.0);
    assert_eq!(d.cycle.local_ms, 1500.0);
    assert!((d.cycle.phase - 0.5).abs() < 1e-12);
}

#[test]
fn switching_scene_decoration_mid_scene_recaptures_the_cycle() {
    let mut s = scenes(&[4.0]);
    s[0].decoration = SceneDecoration::Sparkle;
    let mut sync = DecorationSync::new();
    let settings = GlobalSettings::default();

    let d = sync.sample(&tick(1, 0, 500.0), &s, &settings).scene.unwrap();
    assert_eq!(d.cycle.cycle_ms, 1200.0);

    s[0].decoration = SceneDecoration::Spotlight;
    let d = sync.sample(&tick(1, 0, 1000.0), &s, &settings).scene.unwrap();
    assert_eq!(d.decoration, SceneDecoration::Spotlight);
    assert_eq!(d.cycle.cycle_ms, 4000.0);
    assert!((d.cycle.phase - 0.25).abs() < 1e-12);

    // A bound cycle follows a duration edit on the shown scene.
    s[0].duration = 2.0;
    let d = sync.sample(&tick(1, 0, 1500.0), &s, &settings).scene.unwrap();
    assert_eq!(d.cycle.cycle_ms, 2000.0);
    assert!((d.cycle.phase - 0.75).abs() < 1e-12);
}

#[test]
fn cycle_lengths() {
    assert_eq!(scene_cycle(SceneDecoration::None), None);
    assert_eq!(
        scene_cycle(SceneDecoration::Spotlight),
        Some(CycleLength::SceneDuration)
    );
    assert!(matches!(
        scene_cycle(SceneDecoration::Confetti),
        Some(CycleLength::Fixed(ms)) if ms > 0.0
    ));
}
