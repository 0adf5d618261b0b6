/// Single monotonic elapsed-time source for the whole scene.
///
/// The frame loop advances this exactly once per rendered frame; every other
/// component only reads it. Accumulation is in `f64` seconds so long sessions
/// keep sub-millisecond precision for the shader time feeds.
#[derive(Clone, Debug, Default)]
pub struct SceneClock {
    elapsed_sec: f64,
}

impl SceneClock {
    pub fn new() -> Self {
        Self { elapsed_sec: 0.0 }
    }

    /// Advance by a frame delta and return the new elapsed time.
    ///
    /// Negative or non-finite deltas (suspended tab, clock hiccup) are
    /// treated as zero so elapsed time stays monotonic.
    pub fn advance(&mut self, dt_sec: f64) -> f64 {
        if dt_sec.is_finite() && dt_sec > 0.0 {
            self.elapsed_sec += dt_sec;
        }
        self.elapsed_sec
    }

    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed_sec
    }

    /// Elapsed time narrowed for GPU uniforms.
    #[inline]
    pub fn elapsed_f32(&self) -> f32 {
        self.elapsed_sec as f32
    }
}
