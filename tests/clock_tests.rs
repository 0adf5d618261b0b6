// Host-side tests for the shared scene clock.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod clock {
    include!("../src/core/clock.rs");
}

use clock::SceneClock;

#[test]
fn accumulates_frame_deltas() {
    let mut c = SceneClock::new();
    assert_eq!(c.elapsed(), 0.0);
    c.advance(0.016);
    c.advance(0.016);
    assert!((c.elapsed() - 0.032).abs() < 1e-12);
}

#[test]
fn returns_new_elapsed_from_advance() {
    let mut c = SceneClock::new();
    let t = c.advance(0.5);
    assert_eq!(t, c.elapsed());
    assert!((t - 0.5).abs() < 1e-12);
}

#[test]
fn ignores_negative_and_non_finite_deltas() {
    let mut c = SceneClock::new();
    c.advance(1.0);
    c.advance(-0.25);
    c.advance(f64::NAN);
    c.advance(f64::INFINITY);
    assert_eq!(c.elapsed(), 1.0);
}

#[test]
fn elapsed_f32_narrows_without_surprises() {
    let mut c = SceneClock::new();
    c.advance(2.5);
    assert!((c.elapsed_f32() - 2.5_f32).abs() < 1e-6);
}

#[test]
fn stays_monotonic_over_many_frames() {
    let mut c = SceneClock::new();
    let mut prev = 0.0;
    for i in 0..10_000 {
        let dt = if i % 97 == 0 { -1.0 } else { 1.0 / 60.0 };
        let t = c.advance(dt);
        assert!(t >= prev, "elapsed went backwards at frame {i}");
        prev = t;
    }
}
