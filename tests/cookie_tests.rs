// Host-side tests for the light-cookie synthesizer.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod cookie {
    include!("../src/core/cookie.rs");
}

use cookie::{CookieConfig, CookieSynth};

fn small_config() -> CookieConfig {
    CookieConfig {
        agent_count: 8,
        surface_size: 64,
        ..CookieConfig::default()
    }
}

#[test]
fn same_seed_reproduces_the_agent_pool() {
    let a = CookieSynth::new(small_config(), 7);
    let b = CookieSynth::new(small_config(), 7);
    for (x, y) in a.agents().iter().zip(b.agents()) {
        assert_eq!(x.x, y.x);
        assert_eq!(x.y, y.y);
        assert_eq!(x.vx, y.vx);
        assert_eq!(x.vy, y.vy);
        assert_eq!(x.size, y.size);
    }
}

#[test]
fn different_seeds_diverge() {
    let a = CookieSynth::new(small_config(), 1);
    let b = CookieSynth::new(small_config(), 2);
    let same = a
        .agents()
        .iter()
        .zip(b.agents())
        .all(|(x, y)| x.x == y.x && x.y == y.y);
    assert!(!same);
}

#[test]
fn velocities_respect_the_speed_limit() {
    let s = CookieSynth::new(CookieConfig::default(), 99);
    let limit = CookieConfig::default().speed_limit;
    for a in s.agents() {
        assert!(a.vx.abs() <= limit);
        assert!(a.vy.abs() <= limit);
    }
}

#[test]
fn positions_stay_on_the_surface_across_many_frames() {
    let mut s = CookieSynth::new(small_config(), 3);
    let side = s.surface_size() as f32;
    for frame in 0..2_000 {
        s.advance(frame as f64 / 60.0);
        for a in s.agents() {
            assert!(a.x >= 0.0 && a.x < side, "x out of range: {}", a.x);
            assert!(a.y >= 0.0 && a.y < side, "y out of range: {}", a.y);
        }
    }
}

#[test]
fn wrap_is_toroidal_in_both_directions() {
    // Leaving the right edge re-enters on the left with the overshoot kept.
    assert_eq!(cookie::wrap(511.0 + 2.0, 512.0), 1.0);
    assert_eq!(cookie::wrap(-1.0, 512.0), 511.0);
    assert_eq!(cookie::wrap(512.0, 512.0), 0.0);
    assert_eq!(cookie::wrap(250.0, 512.0), 250.0);
}

#[test]
fn velocity_survives_the_wrap() {
    let mut s = CookieSynth::new(small_config(), 17);
    let before: Vec<(f32, f32)> = s.agents().iter().map(|a| (a.vx, a.vy)).collect();
    for frame in 0..500 {
        s.advance(frame as f64 / 60.0);
    }
    let after: Vec<(f32, f32)> = s.agents().iter().map(|a| (a.vx, a.vy)).collect();
    assert_eq!(before, after);
}

#[test]
fn advance_raises_dirty_exactly_once() {
    let mut s = CookieSynth::new(small_config(), 5);
    assert!(!s.take_dirty());
    s.advance(0.016);
    assert!(s.take_dirty());
    assert!(!s.take_dirty());
}

#[test]
fn surface_is_opaque_and_stroked_in_the_configured_color() {
    let mut s = CookieSynth::new(small_config(), 11);
    s.advance(1.0);
    let px = s.pixels();
    // Default stroke is cyan: red stays at the cleared black.
    let mut lit = 0usize;
    for p in px.chunks_exact(4) {
        assert_eq!(p[3], 0xff, "surface must stay opaque");
        assert_eq!(p[0], 0, "red channel should never be painted");
        if p[1] > 0 || p[2] > 0 {
            lit += 1;
        }
    }
    assert!(lit > 0, "at least one stroke pixel expected");
}

#[test]
fn overlapping_strokes_brighten_additively() {
    // Many agents on a tiny surface force overlaps; the brightest pixels
    // must exceed a single soft-edged stamp's contribution.
    let mut s = CookieSynth::new(
        CookieConfig {
            agent_count: 24,
            surface_size: 32,
            ..CookieConfig::default()
        },
        13,
    );
    s.advance(0.5);
    let max_g = s.pixels().chunks_exact(4).map(|p| p[1]).max().unwrap();
    assert_eq!(max_g, 255, "stacked strokes should saturate");
}

#[test]
fn zero_sized_config_falls_back_to_defaults() {
    let s = CookieSynth::new(
        CookieConfig {
            agent_count: 0,
            surface_size: 0,
            ..CookieConfig::default()
        },
        1,
    );
    let d = CookieConfig::default();
    assert_eq!(s.agents().len(), d.agent_count);
    assert_eq!(s.surface_size(), d.surface_size);
}

#[test]
fn redraw_is_a_pure_function_of_time_and_state() {
    let mut a = CookieSynth::new(small_config(), 21);
    let mut b = CookieSynth::new(small_config(), 21);
    for frame in 0..30 {
        let t = frame as f64 / 60.0;
        a.advance(t);
        b.advance(t);
    }
    assert_eq!(a.pixels(), b.pixels());
}
