// Web-frontend tuning constants.
//
// Seeds are fixed so a reload rebuilds the identical scene; the generators
// themselves are deterministic given a seed.

// Procedural generation seeds
pub const COOKIE_SEED: u64 = 7;
pub const FIELD_SEED: u64 = 42;
pub const SKIN_SEED: u64 = 1013;

// Raster resolutions for one-shot generated textures
pub const SPRITE_RESOLUTION: u32 = 128;
pub const SKIN_RESOLUTION: u32 = 256;

// Particle rendering
// World-space half-size per unit of generated particle size.
pub const POINT_WORLD_SCALE: f32 = 0.12;

// Post-processing defaults (threshold low enough that every overdriven
// particle color clears it)
pub const BLOOM_STRENGTH: f32 = 0.5;
pub const BLOOM_THRESHOLD: f32 = 0.2;

// Subject stand-in mesh tessellation
pub const SUBJECT_RINGS: u32 = 32;
pub const SUBJECT_SEGMENTS: u32 = 48;
