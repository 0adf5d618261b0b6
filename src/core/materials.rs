use glam::{Mat4, Vec3};
use smallvec::SmallVec;

/// Uniform scale applied to the caustic overlay geometry relative to the
/// base layer. Coincident clones z-fight; a one-percent shell does not.
pub const CAUSTIC_LAYER_SCALE: f32 = 1.01;

/// CPU-side parameters of the caustic overlay material. These are tuning
/// defaults, not contracts: only the qualitative behavior (continuous
/// time-based scroll, upward-facing mask, additive tinted output) is
/// load-bearing.
#[derive(Clone, Debug)]
pub struct CausticParams {
    /// Glow tint, cyan by default.
    pub tint: Vec3,
    pub intensity: f32,
    /// UV tiling factor for the caustic texture.
    pub tile: f32,
    /// UV scroll in tiles per second per axis; time-based so playback speed
    /// is independent of frame rate.
    pub scroll: [f32; 2],
    /// Exponent on the up-facing mask; higher pins the effect to the back.
    pub mask_exponent: f32,
}

impl Default for CausticParams {
    fn default() -> Self {
        Self {
            tint: Vec3::new(0.0, 1.0, 1.0),
            intensity: 0.8,
            tile: 3.0,
            scroll: [0.06, 0.03],
            mask_exponent: 2.0,
        }
    }
}

/// GPU uniform block for one caustic-layer mesh segment.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CausticUniforms {
    pub model: [[f32; 4]; 4],
    pub tint: [f32; 3],
    pub intensity: f32,
    pub scroll: [f32; 2],
    pub tile: f32,
    pub mask_exponent: f32,
    pub time: f32,
    pub _pad: [f32; 3],
}

impl CausticUniforms {
    pub fn new(params: &CausticParams, model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            tint: params.tint.to_array(),
            intensity: params.intensity,
            scroll: params.scroll,
            tile: params.tile,
            mask_exponent: params.mask_exponent,
            time: 0.0,
            _pad: [0.0; 3],
        }
    }
}

/// Registry of every caustic-layer uniform set in the scene.
///
/// All segments share the same clock value; updating them through one
/// broadcast call keeps the "exactly one writer per frame" rule explicit
/// instead of relying on aliased shared material objects.
#[derive(Default)]
pub struct UniformBroadcast {
    sets: SmallVec<[CausticUniforms; 4]>,
}

impl UniformBroadcast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a segment's uniform set and return its handle.
    pub fn register(&mut self, uniforms: CausticUniforms) -> usize {
        self.sets.push(uniforms);
        self.sets.len() - 1
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Per-frame time feed: every registered set receives the same elapsed
    /// time. No other field is touched.
    pub fn broadcast_time(&mut self, elapsed_sec: f64) {
        let t = elapsed_sec as f32;
        for s in &mut self.sets {
            s.time = t;
        }
    }

    /// Replace a segment's model transform (e.g. the subject bobbed).
    pub fn set_model(&mut self, handle: usize, model: Mat4) {
        if let Some(s) = self.sets.get_mut(handle) {
            s.model = model.to_cols_array_2d();
        }
    }

    #[inline]
    pub fn get(&self, handle: usize) -> Option<&CausticUniforms> {
        self.sets.get(handle)
    }

    /// Snapshot for upload.
    #[inline]
    pub fn sets(&self) -> &[CausticUniforms] {
        &self.sets
    }
}
