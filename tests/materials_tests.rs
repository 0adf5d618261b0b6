// Host-side tests for the caustic material uniforms and their broadcast.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod materials {
    include!("../src/core/materials.rs");
}

use glam::Mat4;
use materials::{
    CausticParams, CausticUniforms, UniformBroadcast, CAUSTIC_LAYER_SCALE,
};

#[test]
fn uniform_block_has_a_stable_gpu_layout() {
    // mat4 + 3 vec4-sized trailing rows; must match the WGSL struct.
    assert_eq!(std::mem::size_of::<CausticUniforms>(), 112);
    assert_eq!(std::mem::size_of::<CausticUniforms>() % 16, 0);
}

#[test]
fn new_uniforms_carry_the_params() {
    let p = CausticParams::default();
    let u = CausticUniforms::new(&p, Mat4::IDENTITY);
    assert_eq!(u.tint, p.tint.to_array());
    assert_eq!(u.intensity, p.intensity);
    assert_eq!(u.scroll, p.scroll);
    assert_eq!(u.tile, p.tile);
    assert_eq!(u.mask_exponent, p.mask_exponent);
    assert_eq!(u.time, 0.0);
}

#[test]
fn shell_scale_is_a_strict_inflation() {
    assert!(CAUSTIC_LAYER_SCALE > 1.0);
    assert!(CAUSTIC_LAYER_SCALE < 1.1);
}

#[test]
fn broadcast_feeds_every_registered_set_the_same_time() {
    let p = CausticParams::default();
    let mut b = UniformBroadcast::new();
    let h0 = b.register(CausticUniforms::new(&p, Mat4::IDENTITY));
    let h1 = b.register(CausticUniforms::new(&p, Mat4::IDENTITY));
    assert_eq!(b.len(), 2);
    b.broadcast_time(7.25);
    assert_eq!(b.get(h0).map(|s| s.time), Some(7.25));
    assert_eq!(b.get(h1).map(|s| s.time), Some(7.25));
}

#[test]
fn broadcast_touches_only_the_time_field() {
    let p = CausticParams::default();
    let mut b = UniformBroadcast::new();
    let h = b.register(CausticUniforms::new(&p, Mat4::IDENTITY));
    let before = *b.get(h).unwrap();
    b.broadcast_time(99.0);
    let after = *b.get(h).unwrap();
    assert_eq!(after.tint, before.tint);
    assert_eq!(after.intensity, before.intensity);
    assert_eq!(after.scroll, before.scroll);
    assert_eq!(after.model, before.model);
    assert_eq!(after.time, 99.0);
}

#[test]
fn set_model_replaces_one_segment_transform() {
    let p = CausticParams::default();
    let mut b = UniformBroadcast::new();
    let h0 = b.register(CausticUniforms::new(&p, Mat4::IDENTITY));
    let h1 = b.register(CausticUniforms::new(&p, Mat4::IDENTITY));
    let m = Mat4::from_translation(glam::Vec3::new(0.0, 0.5, 0.0));
    b.set_model(h0, m);
    assert_eq!(b.get(h0).unwrap().model, m.to_cols_array_2d());
    assert_eq!(
        b.get(h1).unwrap().model,
        Mat4::IDENTITY.to_cols_array_2d()
    );
    // Out-of-range handles are ignored.
    b.set_model(42, m);
}

#[test]
fn scroll_animation_is_time_based_not_frame_based() {
    // Equal elapsed times must yield equal animated offsets regardless of
    // how many broadcasts happened along the way.
    let p = CausticParams::default();
    let mut a = UniformBroadcast::new();
    let mut b = UniformBroadcast::new();
    let ha = a.register(CausticUniforms::new(&p, Mat4::IDENTITY));
    let hb = b.register(CausticUniforms::new(&p, Mat4::IDENTITY));
    for i in 1..=100 {
        a.broadcast_time(i as f64 * 0.1);
    }
    b.broadcast_time(10.0);
    let ta = a.get(ha).unwrap().time;
    let tb = b.get(hb).unwrap().time;
    assert!((ta - tb).abs() < 1e-5);
    let offset_a = [p.scroll[0] * ta, p.scroll[1] * ta];
    let offset_b = [p.scroll[0] * tb, p.scroll[1] * tb];
    assert!((offset_a[0] - offset_b[0]).abs() < 1e-5);
    assert!((offset_a[1] - offset_b[1]).abs() < 1e-5);
}
