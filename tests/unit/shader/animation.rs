use super::*;
use crate::config::AuroraParams;
use crate::encode::sink::InMemorySink;

fn shader() -> AuroraShader {
    AuroraShader::new([0.9, 0.3, 0.1], [0.1, 0.3, 0.9], AuroraParams::default())
}

#[test]
fn fixed_step_clock_advances_by_frame() {
    let mut clock = FrameClock::fixed_step(4);
    assert_eq!(clock.advance(), 0.0);
    assert_eq!(clock.advance(), 0.25);
    assert_eq!(clock.advance(), 0.5);
    assert_eq!(FrameClock::fixed_step(0).fps(), 1);
}

#[test]
fn ticks_render_distinct_frames_over_time() {
    let mut l = AuroraLoop::start(shader(), 16, 12, FrameClock::fixed_step(1), false).unwrap();
    let a = l.tick().unwrap();
    let b = l.tick().unwrap();
    assert_ne!(a, b);
    assert_eq!(l.frames_rendered(), 2);
}

#[test]
fn cancel_stops_loop_and_releases_program() {
    let mut l = AuroraLoop::start(shader(), 8, 8, FrameClock::fixed_step(30), false).unwrap();
    let handle = l.cancel_handle();
    assert!(l.tick().is_some());
    handle.cancel();
    assert!(l.tick().is_none());
    assert!(!l.is_running());
    assert!(l.size().is_none());
    l.stop();
    assert!(l.tick().is_none());
}

#[test]
fn run_respects_frame_budget() {
    let mut l = AuroraLoop::start(shader(), 6, 4, FrameClock::fixed_step(10), false).unwrap();
    let mut sink = InMemorySink::new();
    assert_eq!(l.run(&mut sink, Some(3)).unwrap(), 3);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| *i).collect();
    assert_eq!(idx, vec![0, 1, 2]);
    assert_eq!(sink.config().unwrap().fps, 10);
    assert!(sink.is_ended());
    assert!(l.is_running());
}

#[test]
fn run_after_cancel_pushes_nothing() {
    let mut l = AuroraLoop::start(shader(), 6, 4, FrameClock::fixed_step(10), false).unwrap();
    l.cancel_handle().cancel();
    let mut sink = InMemorySink::new();
    assert_eq!(l.run(&mut sink, None).unwrap(), 0);
    assert!(sink.frames().is_empty());
}

#[test]
fn unusable_surface_yields_no_loop() {
    assert!(AuroraLoop::start(shader(), 0, 8, FrameClock::system(), false).is_none());
}
