use glam::{Quat, Vec3};
use rand::prelude::*;

/// Palette the field samples from: gold, hot pink, cyan, white, purple.
pub const GLOW_PALETTE: [[f32; 3]; 5] = [
    [1.0, 0.667, 0.0],
    [1.0, 0.0, 0.667],
    [0.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.667, 0.0, 1.0],
];

#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub count: usize,
    /// Edge length of the cubic spawn volume, centered on the origin.
    pub volume_extent: f32,
    pub palette: Vec<[f32; 3]>,
    /// Palette colors are scaled by a random factor from this range. The low
    /// bound stays above 1 so every particle crosses the bloom threshold.
    pub intensity_min: f32,
    pub intensity_span: f32,
    pub size_min: f32,
    pub size_span: f32,
    /// Primary-axis spin in rad/s; the secondary axis turns at 0.2x.
    pub spin_rate: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 3000,
            volume_extent: 150.0,
            palette: GLOW_PALETTE.to_vec(),
            intensity_min: 1.0,
            intensity_span: 4.0,
            size_min: 0.5,
            size_span: 3.0,
            spin_rate: 0.05,
        }
    }
}

/// Immutable glow-particle attributes plus the field's rotation law.
///
/// Attribute arrays are generated once; only the aggregate rotation varies,
/// and it is a pure function of elapsed time so variable frame pacing cannot
/// make the field drift.
pub struct ParticleField {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    sizes: Vec<f32>,
    spin_rate: f32,
}

impl ParticleField {
    pub fn generate(mut config: FieldConfig, seed: u64) -> Self {
        if config.palette.is_empty() {
            log::warn!("particles: empty palette, using built-in");
            config.palette = GLOW_PALETTE.to_vec();
        }
        if config.intensity_min < 1.0 {
            // Overdriven color is what makes the bloom stage key on these
            // points at all; refuse to generate dim particles.
            log::warn!("particles: intensity_min {} < 1, clamping", config.intensity_min);
            config.intensity_min = 1.0;
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let half = config.volume_extent * 0.5;
        let mut positions = Vec::with_capacity(config.count);
        let mut colors = Vec::with_capacity(config.count);
        let mut sizes = Vec::with_capacity(config.count);
        for _ in 0..config.count {
            positions.push(Vec3::new(
                (rng.gen::<f32>() - 0.5) * config.volume_extent,
                (rng.gen::<f32>() - 0.5) * config.volume_extent,
                (rng.gen::<f32>() - 0.5) * config.volume_extent,
            ));
            let base = config.palette[rng.gen_range(0..config.palette.len())];
            // Strictly above the floor: a particle scaled by exactly 1.0
            // could land on the threshold instead of past it.
            let overdrive = (rng.gen::<f32>() * config.intensity_span).max(1e-3);
            let intensity = config.intensity_min + overdrive;
            colors.push(Vec3::from(base) * intensity);
            sizes.push(config.size_min + rng.gen::<f32>() * config.size_span);
        }
        debug_assert!(positions.iter().all(|p| p.abs().max_element() <= half));

        Self {
            positions,
            colors,
            sizes,
            spin_rate: config.spin_rate,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    #[inline]
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Whole-field rotation for a given elapsed time: slow yaw plus a
    /// slower roll.
    pub fn rotation(&self, elapsed_sec: f64) -> Quat {
        let t = elapsed_sec as f32 * self.spin_rate;
        Quat::from_rotation_y(t) * Quat::from_rotation_z(t * 0.2)
    }
}

/// One-shot radial sprite used by the point renderer: hot white core with a
/// rapid falloff so each particle reads as a spark rather than a blob.
/// Returns a square RGBA8 raster.
pub fn sprite_gradient(resolution: u32) -> Vec<u8> {
    let res = resolution.max(2);
    let mut px = vec![0u8; (res * res * 4) as usize];
    let center = (res as f32 - 1.0) * 0.5;
    for y in 0..res {
        for x in 0..res {
            let dx = (x as f32 - center) / center;
            let dy = (y as f32 - center) / center;
            let d = (dx * dx + dy * dy).sqrt().min(1.0);
            // Gradient stops: solid to 10%, sharp drop to 10% alpha at 40%,
            // transparent at the rim.
            let a = if d < 0.1 {
                1.0 - (d / 0.1) * 0.2
            } else if d < 0.4 {
                0.8 - (d - 0.1) / 0.3 * 0.7
            } else {
                0.1 * (1.0 - (d - 0.4) / 0.6)
            };
            let i = ((y * res + x) * 4) as usize;
            let v = (a.clamp(0.0, 1.0) * 255.0) as u8;
            px[i] = 0xff;
            px[i + 1] = 0xff;
            px[i + 2] = 0xff;
            px[i + 3] = v;
        }
    }
    px
}
