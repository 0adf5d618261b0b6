// Host-side tests for the glow-particle field generator.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod particles {
    include!("../src/core/particles.rs");
}

use particles::{sprite_gradient, FieldConfig, ParticleField, GLOW_PALETTE};

#[test]
fn generates_the_configured_count() {
    let f = ParticleField::generate(FieldConfig::default(), 42);
    assert_eq!(f.len(), 3000);
    assert!(!f.is_empty());
}

#[test]
fn positions_fill_the_centered_cube() {
    let cfg = FieldConfig::default();
    let half = cfg.volume_extent * 0.5;
    let f = ParticleField::generate(cfg, 42);
    for p in f.positions() {
        assert!(p.x.abs() <= half && p.y.abs() <= half && p.z.abs() <= half);
    }
}

#[test]
fn every_color_is_overdriven_past_one() {
    let f = ParticleField::generate(FieldConfig::default(), 7);
    for c in f.colors() {
        assert!(
            c.max_element() > 1.0,
            "particle color {:?} would not bloom",
            c
        );
    }
}

#[test]
fn colors_are_scaled_palette_entries() {
    let f = ParticleField::generate(FieldConfig::default(), 3);
    for c in f.colors() {
        let max = c.max_element();
        let unit = *c / max;
        let matches_palette = GLOW_PALETTE.iter().any(|p| {
            let pv = glam::Vec3::from(*p);
            let pm = pv.max_element();
            (pv / pm - unit).abs().max_element() < 1e-4
        });
        assert!(matches_palette, "color {:?} not derived from palette", c);
    }
}

#[test]
fn sizes_stay_in_the_configured_band() {
    let cfg = FieldConfig::default();
    let f = ParticleField::generate(cfg.clone(), 9);
    for &s in f.sizes() {
        assert!(s >= cfg.size_min && s < cfg.size_min + cfg.size_span);
    }
}

#[test]
fn same_seed_reproduces_the_field() {
    let a = ParticleField::generate(FieldConfig::default(), 42);
    let b = ParticleField::generate(FieldConfig::default(), 42);
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.colors(), b.colors());
    assert_eq!(a.sizes(), b.sizes());
}

#[test]
fn empty_palette_falls_back_to_builtin() {
    let f = ParticleField::generate(
        FieldConfig {
            palette: vec![],
            count: 64,
            ..FieldConfig::default()
        },
        1,
    );
    assert_eq!(f.len(), 64);
    for c in f.colors() {
        assert!(c.max_element() > 1.0);
    }
}

#[test]
fn dim_intensity_floor_is_clamped_up() {
    let f = ParticleField::generate(
        FieldConfig {
            intensity_min: 0.1,
            count: 128,
            ..FieldConfig::default()
        },
        2,
    );
    for c in f.colors() {
        assert!(c.max_element() > 1.0);
    }
}

#[test]
fn rotation_is_a_pure_function_of_time() {
    let f = ParticleField::generate(FieldConfig::default(), 5);
    let a = f.rotation(12.5);
    let b = f.rotation(12.5);
    assert_eq!(a, b);
    // Secondary axis turns slower than the primary.
    let r = f.rotation(1.0);
    let (_, angle) = r.to_axis_angle();
    assert!(angle > 0.0);
}

#[test]
fn rotation_at_time_zero_is_identity() {
    let f = ParticleField::generate(FieldConfig::default(), 5);
    let r = f.rotation(0.0);
    assert!((r.w - 1.0).abs() < 1e-6);
}

#[test]
fn sprite_gradient_is_hot_in_the_core_and_clear_at_the_rim() {
    let res = 64;
    let px = sprite_gradient(res);
    assert_eq!(px.len(), (res * res * 4) as usize);
    let center = ((res / 2 * res + res / 2) * 4) as usize;
    let corner = 0usize;
    assert!(px[center + 3] > 200, "core should be nearly opaque");
    assert_eq!(px[corner + 3], 0, "corner lies past the rim");
}
