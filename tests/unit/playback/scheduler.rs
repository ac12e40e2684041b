use super::*;
use crate::foundation::core::SceneId;
use crate::playback::host::ManualFrameHost;

fn scenes(durations: &[f64]) -> Vec<Scene> {
    durations
        .iter()
        .zip(1u64..)
        .map(|(&d, id)| Scene::new(SceneId(id), format!("scene {id}"), d).unwrap())
        .collect()
}

/// Fire the single outstanding request at `now_ms`.
fn fire(
    sched: &mut PlaybackScheduler,
    host: &mut ManualFrameHost,
    scenes: &[Scene],
    now_ms: f64,
) -> Option<PlaybackTick> {
    let pending = host.take_pending();
    assert_eq!(pending.len(), 1, "expected exactly one outstanding frame request");
    sched.step(pending[0], now_ms, scenes, host)
}

#[test]
fn start_emits_initial_tick_and_requests_a_frame() {
    let s = scenes(&[1.5, 3.0, 2.0]);
    let mut host = ManualFrameHost::new();
    let mut sched = PlaybackScheduler::default();

    let tick = sched.start(&s, 1000.0, &mut host).unwrap();
    assert_eq!(tick.active_index, 0);
    assert_eq!(tick.progress, 0.0);
    assert_eq!(tick.session_id, SessionId(1));
    assert!(sched.is_playing());
    assert_eq!(host.pending().len(), 1);
}

#[test]
fn scenario_follows_half_open_intervals_and_end_buffer() {
    let s = scenes(&[1.5, 3.0, 2.0]);
    let mut host = ManualFrameHost::new();
    let mut sched = PlaybackScheduler::default();
    sched.start(&s, 0.0, &mut host);

    let t = fire(&mut sched, &mut host, &s, 1400.0).unwrap();
    assert_eq!(t.active_index, 0);
    assert!((t.progress - 0.215).abs() < 1e-3);

    let t = fire(&mut sched, &mut host, &s, 4600.0).unwrap();
    assert_eq!(t.active_index, 2);
    assert!((t.progress - 0.708).abs() < 1e-3);

    let t = fire(&mut sched, &mut host, &s, 6500.0).unwrap();
    assert_eq!(t.progress, 1.0);
    assert!(!t.finished);

    let t = fire(&mut sched, &mut host, &s, 6600.0).unwrap();
    assert_eq!(t.active_index, 2);
    assert_eq!(t.progress, 1.0);
    assert!(sched.is_playing());

    let t = fire(&mut sched, &mut host, &s, 7400.0).unwrap();
    assert!(t.finished);
    assert_eq!(t.active_index, 2);
    assert_eq!(t.progress, 1.0);
    assert!(!sched.is_playing());
    assert_eq!(sched.state().active_scene_index, 2);
    assert!(host.pending().is_empty());
}

#[test]
fn restart_cancels_prior_request_and_bumps_session() {
    let s = scenes(&[1.0, 1.0]);
    let mut host = ManualFrameHost::new();
    let mut sched = PlaybackScheduler::default();

    sched.start(&s, 0.0, &mut host);
    let first = host.pending()[0];
    sched.start(&s, 500.0, &mut host);

    assert_eq!(host.cancelled(), &[first]);
    assert_eq!(host.pending().len(), 1);
    assert_eq!(sched.state().session_id, SessionId(2));
    // The stale token from the first session cannot advance the second one.
    assert!(sched.step(first, 900.0, &s, &mut host).is_none());
    assert_eq!(sched.state().elapsed_ms, 0.0);
}

#[test]
fn stop_cancels_and_keeps_active_index() {
    let s = scenes(&[1.0, 1.0]);
    let mut host = ManualFrameHost::new();
    let mut sched = PlaybackScheduler::default();
    sched.start(&s, 0.0, &mut host);
    fire(&mut sched, &mut host, &s, 1200.0);
    let outstanding = host.pending()[0];

    assert!(sched.stop(&mut host));
    assert_eq!(sched.progress(), 0.0);
    assert_eq!(sched.state().active_scene_index, 1);
    assert!(host.pending().is_empty());

    // No stray step after stop.
    assert!(sched.step(outstanding, 1300.0, &s, &mut host).is_none());
    assert!(!sched.stop(&mut host));
}

#[test]
fn stop_without_session_and_start_on_empty_list_are_no_ops() {
    let mut host = ManualFrameHost::new();
    let mut sched = PlaybackScheduler::default();
    assert!(!sched.stop(&mut host));
    assert!(sched.start(&[], 0.0, &mut host).is_none());
    assert!(!sched.is_playing());
    assert!(host.pending().is_empty());
    assert_eq!(sched.state().session_id, SessionId(0));
}

#[test]
fn clock_regression_clamps_elapsed() {
    let s = scenes(&[2.0]);
    let mut host = ManualFrameHost::new();
    let mut sched = PlaybackScheduler::default();
    sched.start(&s, 5000.0, &mut host);

    let t = fire(&mut sched, &mut host, &s, 4000.0).unwrap();
    assert_eq!(t.elapsed_ms, 0.0);
    assert_eq!(t.progress, 0.0);

    fire(&mut sched, &mut host, &s, 6000.0);
    let t = fire(&mut sched, &mut host, &s, 5500.0).unwrap();
    assert_eq!(t.elapsed_ms, 1000.0);
}

#[test]
fn durations_are_read_live_each_step() {
    let mut s = scenes(&[1.0, 1.0]);
    let mut host = ManualFrameHost::new();
    let mut sched = PlaybackScheduler::default();
    sched.start(&s, 0.0, &mut host);

    s[0].duration = 2.0;
    let t = fire(&mut sched, &mut host, &s, 1500.0).unwrap();
    assert_eq!(t.active_index, 0);
    assert!((t.progress - 0.5).abs() < 1e-9);
}

#[test]
fn custom_end_buffer_is_honored() {
    let s = scenes(&[1.0]);
    let mut host = ManualFrameHost::new();
    let mut sched = PlaybackScheduler::new(PlaybackConfig { end_buffer_ms: 0.0 });
    sched.start(&s, 0.0, &mut host);
    let t = fire(&mut sched, &mut host, &s, 1000.0).unwrap();
    assert!(t.finished);
}
