// Idle motion for the subject and the light rays. All of these are pure
// functions of elapsed time, so replaying a time sequence reproduces the
// motion exactly.

/// Swimming idle for the subject: a gentle vertical bob.
#[inline]
pub fn subject_bob(elapsed_sec: f64) -> f32 {
    let t = elapsed_sec as f32;
    (t * 0.5).sin() * 0.5
}

/// Slight roll around the forward axis to sell the swimming motion.
#[inline]
pub fn subject_roll(elapsed_sec: f64) -> f32 {
    let t = elapsed_sec as f32;
    (t * 0.3).sin() * 0.05
}

/// Sway of a god-ray light source, as an (x, z) offset from its rest
/// position. `delay` de-phases the rays so they don't move in lockstep.
#[inline]
pub fn ray_sway(elapsed_sec: f64, delay: f32) -> (f32, f32) {
    let t = elapsed_sec as f32 + delay;
    ((t * 0.1).sin() * 5.0, (t * 0.15).cos() * 5.0)
}

/// Wander of the ray's floor target, tighter than the source sway so the
/// beam pivots rather than translates.
#[inline]
pub fn ray_target_wander(elapsed_sec: f64, delay: f32) -> (f32, f32) {
    let t = elapsed_sec as f32 + delay;
    ((t * 0.1).sin() * 8.0, (t * 0.15).cos() * 8.0)
}
