use rand::prelude::*;

/// Tuning for the procedural light-cookie synthesizer.
///
/// Defaults reproduce the look this scene was built around: thirty slow
/// agents on a 512x512 surface drawing thick cyan strokes that wobble with
/// elapsed time.
#[derive(Clone, Debug)]
pub struct CookieConfig {
    pub agent_count: usize,
    pub surface_size: u32,
    /// Stroke thickness in surface pixels.
    pub line_width: f32,
    pub stroke_rgb: [u8; 3],
    /// Lateral wobble amplitude in pixels.
    pub wobble_amp: f32,
    /// Wobble angular frequency in rad/s.
    pub wobble_freq: f32,
    /// Velocity components are drawn from [-speed_limit, speed_limit).
    pub speed_limit: f32,
    /// Curve size is drawn from [size_min, size_min + size_span).
    pub size_min: f32,
    pub size_span: f32,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            agent_count: 30,
            surface_size: 512,
            line_width: 12.0,
            stroke_rgb: [0x00, 0xff, 0xff],
            wobble_amp: 20.0,
            wobble_freq: 2.0,
            speed_limit: 1.0,
            size_min: 50.0,
            size_span: 100.0,
        }
    }
}

/// A single curve agent. Velocity is assigned at creation and never changes;
/// position stays within `[0, surface_size)` on both axes after wrap.
#[derive(Clone, Copy, Debug)]
pub struct WaveAgent {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
}

/// Owns the light-cookie raster and its agent pool.
///
/// `advance` redraws the whole surface from scratch every frame and raises
/// the dirty flag so the consumer re-uploads the texture. The agent pool is
/// created once and persists for the synthesizer's lifetime.
pub struct CookieSynth {
    config: CookieConfig,
    agents: Vec<WaveAgent>,
    pixels: Vec<u8>,
    dirty: bool,
}

impl CookieSynth {
    pub fn new(mut config: CookieConfig, seed: u64) -> Self {
        // Soft-fail on nonsense configuration: clamp to the defaults rather
        // than refusing to run (this draws every frame for the process
        // lifetime, a crash is never the right answer here).
        let defaults = CookieConfig::default();
        if config.agent_count == 0 {
            log::warn!("cookie: agent_count 0, using {}", defaults.agent_count);
            config.agent_count = defaults.agent_count;
        }
        if config.surface_size == 0 {
            log::warn!("cookie: surface_size 0, using {}", defaults.surface_size);
            config.surface_size = defaults.surface_size;
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let side = config.surface_size as f32;
        let agents = (0..config.agent_count)
            .map(|_| WaveAgent {
                x: rng.gen::<f32>() * side,
                y: rng.gen::<f32>() * side,
                vx: (rng.gen::<f32>() - 0.5) * 2.0 * config.speed_limit,
                vy: (rng.gen::<f32>() - 0.5) * 2.0 * config.speed_limit,
                size: config.size_min + rng.gen::<f32>() * config.size_span,
            })
            .collect();

        let len = (config.surface_size * config.surface_size * 4) as usize;
        Self {
            config,
            agents,
            pixels: vec![0u8; len],
            dirty: false,
        }
    }

    #[inline]
    pub fn surface_size(&self) -> u32 {
        self.config.surface_size
    }

    /// RGBA8 surface contents, row-major, tightly packed.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn agents(&self) -> &[WaveAgent] {
        &self.agents
    }

    /// Consume the publish flag. Returns true when the surface changed since
    /// the last call and the consumer should re-upload it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Redraw the whole surface for the given elapsed time.
    pub fn advance(&mut self, elapsed_sec: f64) {
        if self.pixels.is_empty() {
            // Backing buffer unavailable; skip this frame's contribution.
            return;
        }
        self.clear();

        let side = self.config.surface_size as f32;
        let t = elapsed_sec as f32;
        for i in 0..self.agents.len() {
            let (x, y) = {
                let a = &mut self.agents[i];
                a.x = wrap(a.x + a.vx, side);
                a.y = wrap(a.y + a.vy, side);
                (a.x, a.y)
            };
            let wobble = (t * self.config.wobble_freq + i as f32).sin() * self.config.wobble_amp;
            // Control points trail downward from the agent so neighbouring
            // strokes overlap and brighten additively.
            self.stroke_bezier(
                [x, y],
                [x + 50.0 + wobble, y + wobble],
                [x - 50.0 - wobble, y + 100.0],
                [x + wobble, y + 200.0],
            );
        }
        self.dirty = true;
    }

    fn clear(&mut self) {
        for px in self.pixels.chunks_exact_mut(4) {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            px[3] = 0xff;
        }
    }

    fn stroke_bezier(&mut self, p0: [f32; 2], c1: [f32; 2], c2: [f32; 2], p3: [f32; 2]) {
        // Chord-length based step count keeps the stamp spacing below half
        // the brush radius so strokes stay solid.
        let radius = (self.config.line_width * 0.5).max(1.0);
        let approx_len = dist(p0, c1) + dist(c1, c2) + dist(c2, p3);
        let steps = ((approx_len / (radius * 0.5)).ceil() as usize).clamp(8, 256);
        for s in 0..=steps {
            let u = s as f32 / steps as f32;
            let p = cubic_point(p0, c1, c2, p3, u);
            self.stamp(p[0], p[1], radius);
        }
    }

    /// Round additive brush with a soft edge. Out-of-bounds pixels clip.
    fn stamp(&mut self, cx: f32, cy: f32, radius: f32) {
        let side = self.config.surface_size as i32;
        let r = radius.ceil() as i32;
        let x0 = (cx.floor() as i32 - r).max(0);
        let x1 = (cx.floor() as i32 + r).min(side - 1);
        let y0 = (cy.floor() as i32 - r).max(0);
        let y1 = (cy.floor() as i32 + r).min(side - 1);
        if x1 < x0 || y1 < y0 {
            return;
        }
        let [sr, sg, sb] = self.config.stroke_rgb;
        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let d = (dx * dx + dy * dy).sqrt();
                if d > radius {
                    continue;
                }
                // Soft falloff toward the rim, 'lighter' composite: channels
                // sum and saturate instead of occluding.
                let w = 1.0 - (d / radius) * (d / radius);
                let idx = ((py * side + px) * 4) as usize;
                self.pixels[idx] = add_sat(self.pixels[idx], sr, w);
                self.pixels[idx + 1] = add_sat(self.pixels[idx + 1], sg, w);
                self.pixels[idx + 2] = add_sat(self.pixels[idx + 2], sb, w);
            }
        }
    }
}

#[inline]
pub(crate) fn wrap(v: f32, side: f32) -> f32 {
    // Toroidal topology: leaving one edge re-enters at the opposite edge
    // with velocity unchanged.
    let w = v.rem_euclid(side);
    if w >= side {
        0.0
    } else {
        w
    }
}

#[inline]
fn add_sat(dst: u8, src: u8, weight: f32) -> u8 {
    let add = (src as f32 * weight) as u16;
    (dst as u16 + add).min(255) as u8
}

#[inline]
fn dist(a: [f32; 2], b: [f32; 2]) -> f32 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    (dx * dx + dy * dy).sqrt()
}

#[inline]
fn cubic_point(p0: [f32; 2], c1: [f32; 2], c2: [f32; 2], p3: [f32; 2], u: f32) -> [f32; 2] {
    let v = 1.0 - u;
    let b0 = v * v * v;
    let b1 = 3.0 * v * v * u;
    let b2 = 3.0 * v * u * u;
    let b3 = u * u * u;
    [
        b0 * p0[0] + b1 * c1[0] + b2 * c2[0] + b3 * p3[0],
        b0 * p0[1] + b1 * c1[1] + b2 * c2[1] + b3 * p3[1],
    ]
}
